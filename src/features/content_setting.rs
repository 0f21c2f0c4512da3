//! Add or edit a saved link.

use std::time::Duration;

use crate::config::TimingConfig;
use crate::domain::{is_web_url, Category, ContentDetail, ContentDraft, ContentItem, LinkMetadata};
use crate::environment::ClientError;
use crate::runtime::{
    Action, BindableAction, Binding, Category as ActionCategory, Effect, EffectKey, Reducer, State,
};

const URL_CHANGED: EffectKey = EffectKey::new("content_setting.url_changed");
const FETCH_METADATA: EffectKey = EffectKey::new("content_setting.fetch_metadata");
const SAVE: EffectKey = EffectKey::new("content_setting.save");

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentSettingState {
    pub draft: ContentDraft,
    pub metadata: LinkMetadata,
    pub categories: Vec<Category>,
    pub url_error: Option<String>,
    pub saving: bool,
    pub alert: Option<String>,
}

impl ContentSettingState {
    /// Editing an existing content.
    pub fn edit(content_id: u64) -> Self {
        Self {
            draft: ContentDraft {
                id: Some(content_id),
                ..ContentDraft::default()
            },
            ..Self::default()
        }
    }

    /// New content prefilled with a link from the clipboard.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            draft: ContentDraft {
                url: url.into(),
                ..ContentDraft::default()
            },
            ..Self::default()
        }
    }

    pub fn can_save(&self) -> bool {
        !self.saving
            && is_web_url(&self.draft.url)
            && !self.draft.title.trim().is_empty()
            && self.draft.category_id.is_some()
    }
}

impl State for ContentSettingState {}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentSettingBinding {
    Url(String),
    Title(String),
    Memo(String),
    Remind(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSettingField {
    Url,
    Title,
    Memo,
    Remind,
}

impl Binding for ContentSettingBinding {
    type State = ContentSettingState;
    type Field = ContentSettingField;

    fn field(&self) -> ContentSettingField {
        match self {
            ContentSettingBinding::Url(_) => ContentSettingField::Url,
            ContentSettingBinding::Title(_) => ContentSettingField::Title,
            ContentSettingBinding::Memo(_) => ContentSettingField::Memo,
            ContentSettingBinding::Remind(_) => ContentSettingField::Remind,
        }
    }

    fn apply(&self, state: &mut ContentSettingState) {
        match self {
            ContentSettingBinding::Url(url) => state.draft.url = url.clone(),
            ContentSettingBinding::Title(title) => state.draft.title = title.clone(),
            ContentSettingBinding::Memo(memo) => state.draft.memo = memo.clone(),
            ContentSettingBinding::Remind(remind) => state.draft.remind = *remind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentSettingAction {
    View(ContentSettingView),
    Inner(ContentSettingInner),
    Async(ContentSettingAsync),
    Delegate(ContentSettingDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentSettingView {
    Binding(ContentSettingBinding),
    OnAppear,
    CategorySelected(u64),
    SaveTapped,
    AlertDismissed,
    BackTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentSettingInner {
    UrlChanged,
    CategoriesLoaded(Vec<Category>),
    ContentLoaded(ContentDetail),
    MetadataLoaded { url: String, metadata: LinkMetadata },
    Saved(ContentItem),
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentSettingAsync {
    FetchCategories,
    FetchContent(u64),
    FetchMetadata(String),
    Save,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentSettingDelegate {
    Saved(ContentItem),
}

impl Action for ContentSettingAction {
    fn category(&self) -> ActionCategory {
        match self {
            ContentSettingAction::View(_) => ActionCategory::View,
            ContentSettingAction::Inner(_) => ActionCategory::Inner,
            ContentSettingAction::Async(_) => ActionCategory::Async,
            ContentSettingAction::Delegate(_) => ActionCategory::Delegate,
        }
    }
}

impl BindableAction for ContentSettingAction {
    type Binding = ContentSettingBinding;

    fn binding(&self) -> Option<&ContentSettingBinding> {
        match self {
            ContentSettingAction::View(ContentSettingView::Binding(binding)) => Some(binding),
            _ => None,
        }
    }
}

/// Feature logic; compose with `.with_bindings()`.
#[derive(Debug, Clone)]
pub struct ContentSettingReducer {
    debounce: Duration,
}

impl ContentSettingReducer {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            debounce: timing.link_debounce(),
        }
    }
}

impl Reducer for ContentSettingReducer {
    type State = ContentSettingState;
    type Action = ContentSettingAction;

    fn reduce(
        &self,
        state: &mut ContentSettingState,
        action: ContentSettingAction,
    ) -> Effect<ContentSettingAction> {
        match action {
            ContentSettingAction::View(view) => self.handle_view(view, state),
            ContentSettingAction::Inner(inner) => self.handle_inner(inner, state),
            ContentSettingAction::Async(request) => self.handle_async(request, state),
            ContentSettingAction::Delegate(_) => Effect::none(),
        }
    }
}

impl ContentSettingReducer {
    fn handle_view(
        &self,
        action: ContentSettingView,
        state: &mut ContentSettingState,
    ) -> Effect<ContentSettingAction> {
        match action {
            ContentSettingView::Binding(binding) => match binding.field() {
                ContentSettingField::Url => {
                    Effect::send(ContentSettingAction::Inner(ContentSettingInner::UrlChanged))
                        .debounce(URL_CHANGED, self.debounce)
                }
                ContentSettingField::Title
                | ContentSettingField::Memo
                | ContentSettingField::Remind => Effect::none(),
            },
            ContentSettingView::OnAppear => {
                let mut effects = vec![Effect::send(ContentSettingAction::Async(
                    ContentSettingAsync::FetchCategories,
                ))];
                if let Some(id) = state.draft.id {
                    effects.push(Effect::send(ContentSettingAction::Async(
                        ContentSettingAsync::FetchContent(id),
                    )));
                } else if !state.draft.url.is_empty() {
                    effects.push(Effect::send(ContentSettingAction::Inner(
                        ContentSettingInner::UrlChanged,
                    )));
                }
                Effect::merge(effects)
            }
            ContentSettingView::CategorySelected(id) => {
                if state.categories.iter().any(|category| category.id == id) {
                    state.draft.category_id = Some(id);
                } else {
                    tracing::trace!(id, "selected unknown category");
                }
                Effect::none()
            }
            ContentSettingView::SaveTapped => {
                if !state.can_save() {
                    return Effect::none();
                }
                Effect::send(ContentSettingAction::Async(ContentSettingAsync::Save))
            }
            ContentSettingView::AlertDismissed => {
                state.alert = None;
                Effect::none()
            }
            ContentSettingView::BackTapped => Effect::dismiss(),
        }
    }

    fn handle_inner(
        &self,
        action: ContentSettingInner,
        state: &mut ContentSettingState,
    ) -> Effect<ContentSettingAction> {
        match action {
            ContentSettingInner::UrlChanged => {
                let url = state.draft.url.trim().to_string();
                if is_web_url(&url) {
                    state.url_error = None;
                    return Effect::send(ContentSettingAction::Async(
                        ContentSettingAsync::FetchMetadata(url),
                    ));
                }
                state.url_error = (!url.is_empty()).then(|| "not a valid link".to_string());
                state.metadata = LinkMetadata::default();
                Effect::cancel(FETCH_METADATA)
            }
            ContentSettingInner::CategoriesLoaded(categories) => {
                if state.draft.category_id.is_none() {
                    state.draft.category_id = categories.first().map(|category| category.id);
                }
                state.categories = categories;
                Effect::none()
            }
            ContentSettingInner::ContentLoaded(content) => {
                let url = content.url.clone();
                state.draft = ContentDraft {
                    id: Some(content.id),
                    url: content.url,
                    title: content.title,
                    memo: content.memo,
                    category_id: Some(content.category_id),
                    thumbnail: state.draft.thumbnail.take(),
                    remind: content.remind,
                };
                Effect::send(ContentSettingAction::Async(
                    ContentSettingAsync::FetchMetadata(url),
                ))
            }
            ContentSettingInner::MetadataLoaded { url, metadata } => {
                if url != state.draft.url.trim() {
                    tracing::trace!(%url, "ignoring metadata for stale link");
                    return Effect::none();
                }
                if state.draft.title.trim().is_empty() {
                    if let Some(title) = &metadata.title {
                        state.draft.title = title.clone();
                    }
                }
                state.draft.thumbnail = metadata.image_url.clone();
                state.metadata = metadata;
                Effect::none()
            }
            ContentSettingInner::Saved(content) => {
                state.saving = false;
                Effect::send(ContentSettingAction::Delegate(ContentSettingDelegate::Saved(
                    content,
                )))
            }
            ContentSettingInner::Failed(error) => {
                state.saving = false;
                state.alert = Some(error.to_string());
                Effect::none()
            }
        }
    }

    fn handle_async(
        &self,
        action: ContentSettingAsync,
        state: &mut ContentSettingState,
    ) -> Effect<ContentSettingAction> {
        match action {
            ContentSettingAsync::FetchCategories => Effect::task(
                |env| async move {
                    let categories = env.category.categories().await;
                    categories.map(|categories| {
                        ContentSettingAction::Inner(ContentSettingInner::CategoriesLoaded(
                            categories,
                        ))
                    })
                },
                failed,
            ),
            ContentSettingAsync::FetchContent(id) => Effect::task(
                move |env| async move {
                    let content = env.content.content_detail(id).await;
                    content.map(|content| {
                        ContentSettingAction::Inner(ContentSettingInner::ContentLoaded(content))
                    })
                },
                failed,
            ),
            ContentSettingAsync::FetchMetadata(url) => Effect::run(move |env, send| async move {
                let metadata = env.link_presentation.metadata(&url).await;
                send.send(ContentSettingAction::Inner(
                    ContentSettingInner::MetadataLoaded { url, metadata },
                ));
            })
            .cancellable(FETCH_METADATA),
            ContentSettingAsync::Save => {
                state.saving = true;
                let draft = state.draft.clone();
                Effect::task(
                    move |env| async move {
                        let saved = env.content.save_content(draft).await;
                        saved.map(|content| {
                            ContentSettingAction::Inner(ContentSettingInner::Saved(content))
                        })
                    },
                    failed,
                )
                .cancellable(SAVE)
            }
        }
    }
}

fn failed(error: ClientError) -> ContentSettingAction {
    ContentSettingAction::Inner(ContentSettingInner::Failed(error))
}
