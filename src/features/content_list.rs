//! Full list of unread or favorite contents.

use crate::domain::{ContentItem, ContentListKind, ContentPage, Pageable};
use crate::environment::ClientError;
use crate::runtime::{Action, Category, Effect, EffectKey, IdentifiedVec, Reducer, State};

const FETCH_PAGE: EffectKey = EffectKey::new("content_list.fetch_page");

#[derive(Debug, Clone, PartialEq)]
pub struct ContentListState {
    pub kind: ContentListKind,
    pub contents: IdentifiedVec<u64, ContentItem>,
    pub page: Pageable,
    pub has_next: bool,
    pub loading: bool,
    pub alert: Option<String>,
}

impl ContentListState {
    pub fn new(kind: ContentListKind) -> Self {
        Self {
            kind,
            contents: IdentifiedVec::new(),
            page: Pageable::default(),
            has_next: false,
            loading: false,
            alert: None,
        }
    }
}

impl State for ContentListState {}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentListAction {
    View(ContentListView),
    Inner(ContentListInner),
    Async(ContentListAsync),
    Delegate(ContentListDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentListView {
    OnAppear,
    NextPageRequested,
    ContentTapped(u64),
    AlertDismissed,
    BackTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentListInner {
    PageLoaded(ContentPage),
    FetchFailed(ClientError),
    ContentRemoved(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentListAsync {
    FetchPage(Pageable),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentListDelegate {
    ContentTapped(u64),
}

impl Action for ContentListAction {
    fn category(&self) -> Category {
        match self {
            ContentListAction::View(_) => Category::View,
            ContentListAction::Inner(_) => Category::Inner,
            ContentListAction::Async(_) => Category::Async,
            ContentListAction::Delegate(_) => Category::Delegate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContentListReducer;

impl Reducer for ContentListReducer {
    type State = ContentListState;
    type Action = ContentListAction;

    fn reduce(
        &self,
        state: &mut ContentListState,
        action: ContentListAction,
    ) -> Effect<ContentListAction> {
        match action {
            ContentListAction::View(view) => match view {
                ContentListView::OnAppear => {
                    state.contents.clear();
                    state.page = Pageable::default();
                    Effect::send(ContentListAction::Async(ContentListAsync::FetchPage(
                        state.page.clone(),
                    )))
                }
                ContentListView::NextPageRequested => {
                    if !state.has_next || state.loading {
                        return Effect::none();
                    }
                    Effect::send(ContentListAction::Async(ContentListAsync::FetchPage(
                        state.page.next(),
                    )))
                }
                ContentListView::ContentTapped(id) => Effect::send(ContentListAction::Delegate(
                    ContentListDelegate::ContentTapped(id),
                )),
                ContentListView::AlertDismissed => {
                    state.alert = None;
                    Effect::none()
                }
                ContentListView::BackTapped => Effect::dismiss(),
            },
            ContentListAction::Inner(inner) => {
                match inner {
                    ContentListInner::PageLoaded(page) => {
                        state.loading = false;
                        state.page.page = page.page;
                        state.has_next = page.has_next;
                        state.contents.extend(page.items);
                    }
                    ContentListInner::FetchFailed(error) => {
                        state.loading = false;
                        state.alert = Some(error.to_string());
                    }
                    ContentListInner::ContentRemoved(id) => {
                        state.contents.remove(&id);
                    }
                }
                Effect::none()
            }
            ContentListAction::Async(ContentListAsync::FetchPage(page)) => {
                state.loading = true;
                let kind = state.kind;
                Effect::task(
                    move |env| async move {
                        let page = match kind {
                            ContentListKind::Unread => env.remind.unread(page).await,
                            ContentListKind::Favorite => env.remind.favorites(page).await,
                        };
                        page.map(|page| ContentListAction::Inner(ContentListInner::PageLoaded(page)))
                    },
                    |error| ContentListAction::Inner(ContentListInner::FetchFailed(error)),
                )
                .cancellable(FETCH_PAGE)
            }
            ContentListAction::Delegate(_) => Effect::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appearing_resets_and_fetches_first_page() {
        let mut state = ContentListState::new(ContentListKind::Favorite);
        state.page = Pageable::default().next();
        let (state, effect) =
            ContentListReducer.run(state, ContentListAction::View(ContentListView::OnAppear));
        assert_eq!(state.page, Pageable::default());
        assert_eq!(
            effect.actions(),
            vec![&ContentListAction::Async(ContentListAsync::FetchPage(
                Pageable::default()
            ))]
        );
    }

    #[test]
    fn loaded_page_appends() {
        let state = ContentListState {
            loading: true,
            ..ContentListState::new(ContentListKind::Unread)
        };
        let (state, _) = ContentListReducer.run(
            state,
            ContentListAction::Inner(ContentListInner::PageLoaded(ContentPage {
                items: Vec::new(),
                page: 2,
                has_next: true,
            })),
        );
        assert!(!state.loading);
        assert!(state.has_next);
        assert_eq!(state.page.page, 2);
    }
}
