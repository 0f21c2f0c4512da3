//! Contents of one category, paged.

use crate::domain::{is_web_url, Category, ContentItem, ContentPage, Pageable};
use crate::environment::ClientError;
use crate::runtime::{
    Action, Category as ActionCategory, Effect, EffectKey, IdentifiedVec, Reducer, State,
};

use super::sheet::{SheetItem, SheetOutcome};

const FETCH_CONTENTS: EffectKey = EffectKey::new("category_detail.fetch_contents");
const DELETE_CATEGORY: EffectKey = EffectKey::new("category_detail.delete_category");

/// Deletion waiting for the user's confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Category,
    Content(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDetailState {
    pub category: Category,
    pub contents: IdentifiedVec<u64, ContentItem>,
    pub page: Pageable,
    pub has_next: bool,
    pub loading: bool,
    pub sheet: Option<u64>,
    pub delete_confirm: Option<DeleteTarget>,
    pub share_url: Option<String>,
    pub alert: Option<String>,
}

impl CategoryDetailState {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            contents: IdentifiedVec::new(),
            page: Pageable::default(),
            has_next: false,
            loading: false,
            sheet: None,
            delete_confirm: None,
            share_url: None,
            alert: None,
        }
    }
}

impl State for CategoryDetailState {}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDetailAction {
    View(CategoryDetailView),
    Inner(CategoryDetailInner),
    Async(CategoryDetailAsync),
    Scope(CategoryDetailScope),
    Delegate(CategoryDetailDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDetailView {
    OnAppear,
    NextPageRequested,
    ContentTapped(u64),
    KebabTapped(u64),
    SheetDismissed,
    DeleteCategoryTapped,
    DeleteConfirmed,
    DeleteCancelled,
    ShareCompleted,
    /// Clipboard contents seen while the screen is visible.
    PasteboardChanged(String),
    AlertDismissed,
    BackTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDetailInner {
    ContentsLoaded(ContentPage),
    FetchFailed(ClientError),
    FavoriteChanged { id: u64, favorite: bool },
    ContentRemoved(u64),
    CategoryRemoved,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDetailAsync {
    FetchContents(Pageable),
    SetFavorite { id: u64, favorite: bool },
    DeleteContent(u64),
    DeleteCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDetailScope {
    BottomSheet(SheetItem),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDetailDelegate {
    ContentTapped(u64),
    EditContent(u64),
    CategoryDeleted(u64),
    LinkCopyDetected(String),
}

impl Action for CategoryDetailAction {
    fn category(&self) -> ActionCategory {
        match self {
            CategoryDetailAction::View(_) => ActionCategory::View,
            CategoryDetailAction::Inner(_) => ActionCategory::Inner,
            CategoryDetailAction::Async(_) => ActionCategory::Async,
            CategoryDetailAction::Scope(_) => ActionCategory::Scope,
            CategoryDetailAction::Delegate(_) => ActionCategory::Delegate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryDetailReducer;

impl Reducer for CategoryDetailReducer {
    type State = CategoryDetailState;
    type Action = CategoryDetailAction;

    fn reduce(
        &self,
        state: &mut CategoryDetailState,
        action: CategoryDetailAction,
    ) -> Effect<CategoryDetailAction> {
        match action {
            CategoryDetailAction::View(view) => self.handle_view(view, state),
            CategoryDetailAction::Inner(inner) => self.handle_inner(inner, state),
            CategoryDetailAction::Async(request) => self.handle_async(request, state),
            CategoryDetailAction::Scope(CategoryDetailScope::BottomSheet(item)) => {
                let Some(content) = state.sheet.take().and_then(|id| state.contents.get(&id))
                else {
                    tracing::trace!(?item, "sheet entry without content");
                    return Effect::none();
                };
                match item.outcome(content) {
                    SheetOutcome::Share(url) => {
                        state.share_url = Some(url);
                        Effect::none()
                    }
                    SheetOutcome::Edit(id) => Effect::send(CategoryDetailAction::Delegate(
                        CategoryDetailDelegate::EditContent(id),
                    )),
                    SheetOutcome::SetFavorite { id, favorite } => Effect::send(
                        CategoryDetailAction::Async(CategoryDetailAsync::SetFavorite {
                            id,
                            favorite,
                        }),
                    ),
                    SheetOutcome::ConfirmDelete(id) => {
                        state.delete_confirm = Some(DeleteTarget::Content(id));
                        Effect::none()
                    }
                }
            }
            CategoryDetailAction::Delegate(_) => Effect::none(),
        }
    }
}

impl CategoryDetailReducer {
    fn handle_view(
        &self,
        action: CategoryDetailView,
        state: &mut CategoryDetailState,
    ) -> Effect<CategoryDetailAction> {
        match action {
            CategoryDetailView::OnAppear => {
                state.contents.clear();
                state.page = Pageable::default();
                Effect::send(CategoryDetailAction::Async(
                    CategoryDetailAsync::FetchContents(state.page.clone()),
                ))
            }
            CategoryDetailView::NextPageRequested => {
                if !state.has_next || state.loading {
                    return Effect::none();
                }
                Effect::send(CategoryDetailAction::Async(
                    CategoryDetailAsync::FetchContents(state.page.next()),
                ))
            }
            CategoryDetailView::ContentTapped(id) => Effect::send(CategoryDetailAction::Delegate(
                CategoryDetailDelegate::ContentTapped(id),
            )),
            CategoryDetailView::KebabTapped(id) => {
                state.sheet = Some(id);
                Effect::none()
            }
            CategoryDetailView::SheetDismissed => {
                state.sheet = None;
                Effect::none()
            }
            CategoryDetailView::DeleteCategoryTapped => {
                state.delete_confirm = Some(DeleteTarget::Category);
                Effect::none()
            }
            CategoryDetailView::DeleteConfirmed => match state.delete_confirm.take() {
                Some(DeleteTarget::Category) => {
                    Effect::send(CategoryDetailAction::Async(CategoryDetailAsync::DeleteCategory))
                }
                Some(DeleteTarget::Content(id)) => Effect::send(CategoryDetailAction::Async(
                    CategoryDetailAsync::DeleteContent(id),
                )),
                None => Effect::none(),
            },
            CategoryDetailView::DeleteCancelled => {
                state.delete_confirm = None;
                Effect::none()
            }
            CategoryDetailView::ShareCompleted => {
                state.share_url = None;
                Effect::none()
            }
            CategoryDetailView::PasteboardChanged(text) => {
                if !is_web_url(&text) {
                    return Effect::none();
                }
                Effect::send(CategoryDetailAction::Delegate(
                    CategoryDetailDelegate::LinkCopyDetected(text),
                ))
            }
            CategoryDetailView::AlertDismissed => {
                state.alert = None;
                Effect::none()
            }
            CategoryDetailView::BackTapped => Effect::dismiss(),
        }
    }

    fn handle_inner(
        &self,
        action: CategoryDetailInner,
        state: &mut CategoryDetailState,
    ) -> Effect<CategoryDetailAction> {
        match action {
            CategoryDetailInner::ContentsLoaded(page) => {
                state.loading = false;
                state.page.page = page.page;
                state.has_next = page.has_next;
                state.contents.extend(page.items);
            }
            CategoryDetailInner::FetchFailed(error) => {
                state.loading = false;
                state.alert = Some(error.to_string());
            }
            CategoryDetailInner::FavoriteChanged { id, favorite } => {
                if let Some(content) = state.contents.get_mut(&id) {
                    content.is_favorite = favorite;
                }
            }
            CategoryDetailInner::ContentRemoved(id) => {
                if state.contents.remove(&id).is_some() {
                    state.category.content_count = state.category.content_count.saturating_sub(1);
                }
            }
            CategoryDetailInner::CategoryRemoved => {
                return Effect::send(CategoryDetailAction::Delegate(
                    CategoryDetailDelegate::CategoryDeleted(state.category.id),
                ));
            }
        }
        Effect::none()
    }

    fn handle_async(
        &self,
        action: CategoryDetailAsync,
        state: &mut CategoryDetailState,
    ) -> Effect<CategoryDetailAction> {
        let category_id = state.category.id;
        match action {
            CategoryDetailAsync::FetchContents(page) => {
                state.loading = true;
                Effect::task(
                    move |env| async move {
                        let page = env.category.category_contents(category_id, page).await;
                        page.map(|page| {
                            CategoryDetailAction::Inner(CategoryDetailInner::ContentsLoaded(page))
                        })
                    },
                    failed,
                )
                .cancellable(FETCH_CONTENTS)
            }
            CategoryDetailAsync::SetFavorite { id, favorite } => Effect::task(
                move |env| async move {
                    let favorite = env.content.set_favorite(id, favorite).await;
                    favorite.map(|favorite| {
                        CategoryDetailAction::Inner(CategoryDetailInner::FavoriteChanged {
                            id,
                            favorite,
                        })
                    })
                },
                failed,
            ),
            CategoryDetailAsync::DeleteContent(id) => Effect::task(
                move |env| async move {
                    let deleted = env.content.delete_content(id).await;
                    deleted
                        .map(|()| CategoryDetailAction::Inner(CategoryDetailInner::ContentRemoved(id)))
                },
                failed,
            ),
            CategoryDetailAsync::DeleteCategory => Effect::task(
                move |env| async move {
                    let deleted = env.category.delete_category(category_id).await;
                    deleted.map(|()| CategoryDetailAction::Inner(CategoryDetailInner::CategoryRemoved))
                },
                failed,
            )
            .cancellable(DELETE_CATEGORY),
        }
    }
}

fn failed(error: ClientError) -> CategoryDetailAction {
    CategoryDetailAction::Inner(CategoryDetailInner::FetchFailed(error))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> CategoryDetailState {
        CategoryDetailState::new(Category {
            id: 9,
            name: "Recipes".to_string(),
            image_url: None,
            content_count: 1,
        })
    }

    #[test]
    fn next_page_only_when_more_exist() {
        let (_, effect) = CategoryDetailReducer.run(
            detail(),
            CategoryDetailAction::View(CategoryDetailView::NextPageRequested),
        );
        assert!(effect.is_none());

        let state = CategoryDetailState {
            has_next: true,
            ..detail()
        };
        let (_, effect) = CategoryDetailReducer.run(
            state,
            CategoryDetailAction::View(CategoryDetailView::NextPageRequested),
        );
        assert_eq!(
            effect.actions(),
            vec![&CategoryDetailAction::Async(
                CategoryDetailAsync::FetchContents(Pageable::default().next())
            )]
        );
    }

    #[test]
    fn confirmed_category_delete_starts_request() {
        let (state, _) = CategoryDetailReducer.run(
            detail(),
            CategoryDetailAction::View(CategoryDetailView::DeleteCategoryTapped),
        );
        assert_eq!(state.delete_confirm, Some(DeleteTarget::Category));
        let (_, effect) = CategoryDetailReducer.run(
            state,
            CategoryDetailAction::View(CategoryDetailView::DeleteConfirmed),
        );
        assert_eq!(
            effect.actions(),
            vec![&CategoryDetailAction::Async(
                CategoryDetailAsync::DeleteCategory
            )]
        );
    }

    #[test]
    fn removed_category_is_delegated_with_its_id() {
        let (_, effect) = CategoryDetailReducer.run(
            detail(),
            CategoryDetailAction::Inner(CategoryDetailInner::CategoryRemoved),
        );
        assert_eq!(
            effect.actions(),
            vec![&CategoryDetailAction::Delegate(
                CategoryDetailDelegate::CategoryDeleted(9)
            )]
        );
    }

    #[test]
    fn only_links_on_pasteboard_are_reported() {
        let (_, effect) = CategoryDetailReducer.run(
            detail(),
            CategoryDetailAction::View(CategoryDetailView::PasteboardChanged(
                "grocery list".to_string(),
            )),
        );
        assert!(effect.is_none());

        let (_, effect) = CategoryDetailReducer.run(
            detail(),
            CategoryDetailAction::View(CategoryDetailView::PasteboardChanged(
                "https://pokit.app".to_string(),
            )),
        );
        assert_eq!(
            effect.actions(),
            vec![&CategoryDetailAction::Delegate(
                CategoryDetailDelegate::LinkCopyDetected("https://pokit.app".to_string())
            )]
        );
    }
}
