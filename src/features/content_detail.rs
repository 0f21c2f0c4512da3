//! Sheet showing one saved link.

use crate::domain::{ContentDetail, LinkMetadata};
use crate::environment::ClientError;
use crate::runtime::{Action, Category, Effect, EffectKey, Reducer, State};

const FETCH_DETAIL: EffectKey = EffectKey::new("content_detail.fetch_detail");
const FETCH_METADATA: EffectKey = EffectKey::new("content_detail.fetch_metadata");

#[derive(Debug, Clone, PartialEq)]
pub struct ContentDetailState {
    pub content_id: u64,
    pub content: Option<ContentDetail>,
    pub metadata: LinkMetadata,
    pub delete_confirm: bool,
    pub alert: Option<String>,
}

impl ContentDetailState {
    pub fn new(content_id: u64) -> Self {
        Self {
            content_id,
            content: None,
            metadata: LinkMetadata::default(),
            delete_confirm: false,
            alert: None,
        }
    }
}

impl State for ContentDetailState {}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentDetailAction {
    View(ContentDetailView),
    Inner(ContentDetailInner),
    Async(ContentDetailAsync),
    Delegate(ContentDetailDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentDetailView {
    OnAppear,
    FavoriteTapped,
    EditTapped,
    DeleteTapped,
    DeleteConfirmed,
    DeleteCancelled,
    AlertDismissed,
    CloseTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentDetailInner {
    DetailLoaded(ContentDetail),
    MetadataLoaded(LinkMetadata),
    FavoriteChanged(bool),
    Deleted,
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentDetailAsync {
    FetchDetail,
    FetchMetadata(String),
    SetFavorite(bool),
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentDetailDelegate {
    EditTapped { content_id: u64 },
    ContentDeleted { content_id: u64 },
}

impl Action for ContentDetailAction {
    fn category(&self) -> Category {
        match self {
            ContentDetailAction::View(_) => Category::View,
            ContentDetailAction::Inner(_) => Category::Inner,
            ContentDetailAction::Async(_) => Category::Async,
            ContentDetailAction::Delegate(_) => Category::Delegate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContentDetailReducer;

impl Reducer for ContentDetailReducer {
    type State = ContentDetailState;
    type Action = ContentDetailAction;

    fn reduce(
        &self,
        state: &mut ContentDetailState,
        action: ContentDetailAction,
    ) -> Effect<ContentDetailAction> {
        match action {
            ContentDetailAction::View(view) => self.handle_view(view, state),
            ContentDetailAction::Inner(inner) => self.handle_inner(inner, state),
            ContentDetailAction::Async(request) => self.handle_async(request, state),
            ContentDetailAction::Delegate(_) => Effect::none(),
        }
    }
}

impl ContentDetailReducer {
    fn handle_view(
        &self,
        action: ContentDetailView,
        state: &mut ContentDetailState,
    ) -> Effect<ContentDetailAction> {
        match action {
            ContentDetailView::OnAppear => {
                Effect::send(ContentDetailAction::Async(ContentDetailAsync::FetchDetail))
            }
            ContentDetailView::FavoriteTapped => match &state.content {
                Some(content) => Effect::send(ContentDetailAction::Async(
                    ContentDetailAsync::SetFavorite(!content.is_favorite),
                )),
                None => Effect::none(),
            },
            ContentDetailView::EditTapped => Effect::send(ContentDetailAction::Delegate(
                ContentDetailDelegate::EditTapped {
                    content_id: state.content_id,
                },
            )),
            ContentDetailView::DeleteTapped => {
                state.delete_confirm = true;
                Effect::none()
            }
            ContentDetailView::DeleteConfirmed => {
                state.delete_confirm = false;
                Effect::send(ContentDetailAction::Async(ContentDetailAsync::Delete))
            }
            ContentDetailView::DeleteCancelled => {
                state.delete_confirm = false;
                Effect::none()
            }
            ContentDetailView::AlertDismissed => {
                state.alert = None;
                Effect::none()
            }
            ContentDetailView::CloseTapped => Effect::dismiss(),
        }
    }

    fn handle_inner(
        &self,
        action: ContentDetailInner,
        state: &mut ContentDetailState,
    ) -> Effect<ContentDetailAction> {
        match action {
            ContentDetailInner::DetailLoaded(content) => {
                let url = content.url.clone();
                state.content = Some(content);
                Effect::send(ContentDetailAction::Async(
                    ContentDetailAsync::FetchMetadata(url),
                ))
            }
            ContentDetailInner::MetadataLoaded(metadata) => {
                state.metadata = metadata;
                Effect::none()
            }
            ContentDetailInner::FavoriteChanged(favorite) => {
                if let Some(content) = state.content.as_mut() {
                    content.is_favorite = favorite;
                }
                Effect::none()
            }
            ContentDetailInner::Deleted => Effect::send(ContentDetailAction::Delegate(
                ContentDetailDelegate::ContentDeleted {
                    content_id: state.content_id,
                },
            )),
            ContentDetailInner::Failed(error) => {
                state.alert = Some(error.to_string());
                Effect::none()
            }
        }
    }

    fn handle_async(
        &self,
        action: ContentDetailAsync,
        state: &mut ContentDetailState,
    ) -> Effect<ContentDetailAction> {
        let id = state.content_id;
        match action {
            ContentDetailAsync::FetchDetail => Effect::task(
                move |env| async move {
                    let content = env.content.content_detail(id).await;
                    content.map(|content| {
                        ContentDetailAction::Inner(ContentDetailInner::DetailLoaded(content))
                    })
                },
                failed,
            )
            .cancellable(FETCH_DETAIL),
            ContentDetailAsync::FetchMetadata(url) => Effect::run(move |env, send| async move {
                let metadata = env.link_presentation.metadata(&url).await;
                send.send(ContentDetailAction::Inner(
                    ContentDetailInner::MetadataLoaded(metadata),
                ));
            })
            .cancellable(FETCH_METADATA),
            ContentDetailAsync::SetFavorite(favorite) => Effect::task(
                move |env| async move {
                    let favorite = env.content.set_favorite(id, favorite).await;
                    favorite.map(|favorite| {
                        ContentDetailAction::Inner(ContentDetailInner::FavoriteChanged(favorite))
                    })
                },
                failed,
            ),
            ContentDetailAsync::Delete => Effect::task(
                move |env| async move {
                    let deleted = env.content.delete_content(id).await;
                    deleted.map(|()| ContentDetailAction::Inner(ContentDetailInner::Deleted))
                },
                failed,
            ),
        }
    }
}

fn failed(error: ClientError) -> ContentDetailAction {
    ContentDetailAction::Inner(ContentDetailInner::Failed(error))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> ContentDetail {
        ContentDetail {
            id: 4,
            category_id: 1,
            category_name: "Reading list".to_string(),
            title: "Async book".to_string(),
            url: "https://rust-lang.github.io/async-book/".to_string(),
            memo: String::new(),
            created_at: "2026.10.01".to_string(),
            is_favorite: false,
            remind: false,
        }
    }

    #[test]
    fn loaded_detail_requests_link_metadata() {
        let (state, effect) = ContentDetailReducer.run(
            ContentDetailState::new(4),
            ContentDetailAction::Inner(ContentDetailInner::DetailLoaded(loaded())),
        );
        assert!(state.content.is_some());
        assert_eq!(
            effect.actions(),
            vec![&ContentDetailAction::Async(
                ContentDetailAsync::FetchMetadata(
                    "https://rust-lang.github.io/async-book/".to_string()
                )
            )]
        );
    }

    #[test]
    fn favorite_toggles_current_value() {
        let state = ContentDetailState {
            content: Some(loaded()),
            ..ContentDetailState::new(4)
        };
        let (_, effect) = ContentDetailReducer.run(
            state,
            ContentDetailAction::View(ContentDetailView::FavoriteTapped),
        );
        assert_eq!(
            effect.actions(),
            vec![&ContentDetailAction::Async(
                ContentDetailAsync::SetFavorite(true)
            )]
        );
    }

    #[test]
    fn deletion_is_reported_with_id() {
        let (_, effect) = ContentDetailReducer.run(
            ContentDetailState::new(4),
            ContentDetailAction::Inner(ContentDetailInner::Deleted),
        );
        assert_eq!(
            effect.actions(),
            vec![&ContentDetailAction::Delegate(
                ContentDetailDelegate::ContentDeleted { content_id: 4 }
            )]
        );
    }

    #[test]
    fn close_requests_dismiss() {
        let (_, effect) = ContentDetailReducer.run(
            ContentDetailState::new(4),
            ContentDetailAction::View(ContentDetailView::CloseTapped),
        );
        assert!(effect.requests_dismiss());
    }
}
