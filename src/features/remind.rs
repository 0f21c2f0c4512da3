//! Remind tab: today's reminders plus unread and favorite previews.

use crate::domain::{ContentItem, ContentPage, Pageable};
use crate::environment::ClientError;
use crate::runtime::{Action, Category, Effect, EffectKey, Reducer, State};

use super::sheet::{SheetItem, SheetOutcome};

const FETCH_TODAY: EffectKey = EffectKey::new("remind.fetch_today");
const FETCH_UNREAD: EffectKey = EffectKey::new("remind.fetch_unread");
const FETCH_FAVORITES: EffectKey = EffectKey::new("remind.fetch_favorites");

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemindState {
    pub today: Vec<ContentItem>,
    pub unread: Vec<ContentItem>,
    pub favorites: Vec<ContentItem>,
    /// Content whose bottom sheet is open.
    pub sheet: Option<u64>,
    pub delete_confirm: Option<u64>,
    pub share_url: Option<String>,
    pub alert: Option<String>,
}

impl RemindState {
    fn find(&self, id: u64) -> Option<&ContentItem> {
        self.today
            .iter()
            .chain(&self.unread)
            .chain(&self.favorites)
            .find(|content| content.id == id)
    }

    fn remove(&mut self, id: u64) {
        self.today.retain(|content| content.id != id);
        self.unread.retain(|content| content.id != id);
        self.favorites.retain(|content| content.id != id);
    }
}

impl State for RemindState {}

#[derive(Debug, Clone, PartialEq)]
pub enum RemindAction {
    View(RemindView),
    Inner(RemindInner),
    Async(RemindAsync),
    Scope(RemindScope),
    Delegate(RemindDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemindView {
    OnAppear,
    ContentTapped(u64),
    KebabTapped(u64),
    SheetDismissed,
    DeleteConfirmed,
    DeleteCancelled,
    ShareCompleted,
    UnreadMoreTapped,
    FavoritesMoreTapped,
    AlertDismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemindInner {
    TodayLoaded(Vec<ContentItem>),
    UnreadLoaded(ContentPage),
    FavoritesLoaded(ContentPage),
    FetchFailed(ClientError),
    FavoriteChanged { id: u64, favorite: bool },
    ContentRemoved(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemindAsync {
    RefreshAll,
    FetchToday,
    FetchUnread,
    FetchFavorites,
    SetFavorite { id: u64, favorite: bool },
    DeleteContent(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemindScope {
    BottomSheet(SheetItem),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemindDelegate {
    ContentTapped(u64),
    EditContent(u64),
    ShowUnread,
    ShowFavorites,
}

impl Action for RemindAction {
    fn category(&self) -> Category {
        match self {
            RemindAction::View(_) => Category::View,
            RemindAction::Inner(_) => Category::Inner,
            RemindAction::Async(_) => Category::Async,
            RemindAction::Scope(_) => Category::Scope,
            RemindAction::Delegate(_) => Category::Delegate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RemindReducer;

impl Reducer for RemindReducer {
    type State = RemindState;
    type Action = RemindAction;

    fn reduce(&self, state: &mut RemindState, action: RemindAction) -> Effect<RemindAction> {
        match action {
            RemindAction::View(view) => self.handle_view(view, state),
            RemindAction::Inner(inner) => self.handle_inner(inner, state),
            RemindAction::Async(request) => self.handle_async(request),
            RemindAction::Scope(RemindScope::BottomSheet(item)) => {
                let Some(content) = state.sheet.take().and_then(|id| state.find(id)) else {
                    tracing::trace!(?item, "sheet entry without content");
                    return Effect::none();
                };
                match item.outcome(content) {
                    SheetOutcome::Share(url) => {
                        state.share_url = Some(url);
                        Effect::none()
                    }
                    SheetOutcome::Edit(id) => {
                        Effect::send(RemindAction::Delegate(RemindDelegate::EditContent(id)))
                    }
                    SheetOutcome::SetFavorite { id, favorite } => {
                        Effect::send(RemindAction::Async(RemindAsync::SetFavorite { id, favorite }))
                    }
                    SheetOutcome::ConfirmDelete(id) => {
                        state.delete_confirm = Some(id);
                        Effect::none()
                    }
                }
            }
            RemindAction::Delegate(_) => Effect::none(),
        }
    }
}

impl RemindReducer {
    fn handle_view(&self, action: RemindView, state: &mut RemindState) -> Effect<RemindAction> {
        match action {
            RemindView::OnAppear => Effect::send(RemindAction::Async(RemindAsync::RefreshAll)),
            RemindView::ContentTapped(id) => {
                Effect::send(RemindAction::Delegate(RemindDelegate::ContentTapped(id)))
            }
            RemindView::KebabTapped(id) => {
                state.sheet = Some(id);
                Effect::none()
            }
            RemindView::SheetDismissed => {
                state.sheet = None;
                Effect::none()
            }
            RemindView::DeleteConfirmed => match state.delete_confirm.take() {
                Some(id) => Effect::send(RemindAction::Async(RemindAsync::DeleteContent(id))),
                None => Effect::none(),
            },
            RemindView::DeleteCancelled => {
                state.delete_confirm = None;
                Effect::none()
            }
            RemindView::ShareCompleted => {
                state.share_url = None;
                Effect::none()
            }
            RemindView::UnreadMoreTapped => {
                Effect::send(RemindAction::Delegate(RemindDelegate::ShowUnread))
            }
            RemindView::FavoritesMoreTapped => {
                Effect::send(RemindAction::Delegate(RemindDelegate::ShowFavorites))
            }
            RemindView::AlertDismissed => {
                state.alert = None;
                Effect::none()
            }
        }
    }

    fn handle_inner(&self, action: RemindInner, state: &mut RemindState) -> Effect<RemindAction> {
        match action {
            RemindInner::TodayLoaded(contents) => state.today = contents,
            RemindInner::UnreadLoaded(page) => state.unread = page.items,
            RemindInner::FavoritesLoaded(page) => state.favorites = page.items,
            RemindInner::FetchFailed(error) => state.alert = Some(error.to_string()),
            RemindInner::FavoriteChanged { id, favorite } => {
                for content in state
                    .today
                    .iter_mut()
                    .chain(state.unread.iter_mut())
                    .filter(|content| content.id == id)
                {
                    content.is_favorite = favorite;
                }
                return Effect::send(RemindAction::Async(RemindAsync::FetchFavorites));
            }
            RemindInner::ContentRemoved(id) => state.remove(id),
        }
        Effect::none()
    }

    fn handle_async(&self, action: RemindAsync) -> Effect<RemindAction> {
        match action {
            RemindAsync::RefreshAll => Effect::merge([
                Effect::send(RemindAction::Async(RemindAsync::FetchToday)),
                Effect::send(RemindAction::Async(RemindAsync::FetchUnread)),
                Effect::send(RemindAction::Async(RemindAsync::FetchFavorites)),
            ]),
            RemindAsync::FetchToday => Effect::task(
                |env| async move {
                    let today = env.remind.today().await;
                    today.map(|contents| RemindAction::Inner(RemindInner::TodayLoaded(contents)))
                },
                fetch_failed,
            )
            .cancellable(FETCH_TODAY),
            RemindAsync::FetchUnread => Effect::task(
                |env| async move {
                    let page = env.remind.unread(Pageable::default()).await;
                    page.map(|page| RemindAction::Inner(RemindInner::UnreadLoaded(page)))
                },
                fetch_failed,
            )
            .cancellable(FETCH_UNREAD),
            RemindAsync::FetchFavorites => Effect::task(
                |env| async move {
                    let page = env.remind.favorites(Pageable::default()).await;
                    page.map(|page| RemindAction::Inner(RemindInner::FavoritesLoaded(page)))
                },
                fetch_failed,
            )
            .cancellable(FETCH_FAVORITES),
            RemindAsync::SetFavorite { id, favorite } => Effect::task(
                move |env| async move {
                    let favorite = env.content.set_favorite(id, favorite).await;
                    favorite.map(|favorite| {
                        RemindAction::Inner(RemindInner::FavoriteChanged { id, favorite })
                    })
                },
                fetch_failed,
            ),
            RemindAsync::DeleteContent(id) => Effect::task(
                move |env| async move {
                    let deleted = env.content.delete_content(id).await;
                    deleted.map(|()| RemindAction::Inner(RemindInner::ContentRemoved(id)))
                },
                fetch_failed,
            ),
        }
    }
}

fn fetch_failed(error: ClientError) -> RemindAction {
    RemindAction::Inner(RemindInner::FetchFailed(error))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(id: u64) -> ContentItem {
        ContentItem {
            id,
            category_id: 1,
            category_name: "Reading list".to_string(),
            title: format!("content {id}"),
            url: format!("https://example.com/{id}"),
            memo: String::new(),
            thumbnail: None,
            created_at: "2026.10.01".to_string(),
            is_read: false,
            is_favorite: false,
        }
    }

    #[test]
    fn refresh_requests_every_list() {
        let (_, effect) =
            RemindReducer.run(RemindState::default(), RemindAction::Async(RemindAsync::RefreshAll));
        assert_eq!(
            effect.actions(),
            vec![
                &RemindAction::Async(RemindAsync::FetchToday),
                &RemindAction::Async(RemindAsync::FetchUnread),
                &RemindAction::Async(RemindAsync::FetchFavorites),
            ]
        );
    }

    #[test]
    fn fetches_are_cancellable() {
        let (_, effect) =
            RemindReducer.run(RemindState::default(), RemindAction::Async(RemindAsync::FetchUnread));
        assert!(effect.is_keyed(&FETCH_UNREAD));
    }

    #[test]
    fn sheet_delete_asks_for_confirmation() {
        let state = RemindState {
            today: vec![content(3)],
            sheet: Some(3),
            ..RemindState::default()
        };
        let (state, effect) = RemindReducer.run(
            state,
            RemindAction::Scope(RemindScope::BottomSheet(SheetItem::Delete)),
        );
        assert_eq!(state.sheet, None);
        assert_eq!(state.delete_confirm, Some(3));
        assert!(effect.is_none());

        let (state, effect) =
            RemindReducer.run(state, RemindAction::View(RemindView::DeleteConfirmed));
        assert_eq!(state.delete_confirm, None);
        assert_eq!(
            effect.actions(),
            vec![&RemindAction::Async(RemindAsync::DeleteContent(3))]
        );
    }

    #[test]
    fn sheet_edit_is_delegated() {
        let state = RemindState {
            unread: vec![content(5)],
            sheet: Some(5),
            ..RemindState::default()
        };
        let (_, effect) = RemindReducer.run(
            state,
            RemindAction::Scope(RemindScope::BottomSheet(SheetItem::Edit)),
        );
        assert_eq!(
            effect.actions(),
            vec![&RemindAction::Delegate(RemindDelegate::EditContent(5))]
        );
    }

    #[test]
    fn removed_content_leaves_every_list() {
        let state = RemindState {
            today: vec![content(1), content(2)],
            unread: vec![content(1)],
            favorites: vec![content(1)],
            ..RemindState::default()
        };
        let (state, _) =
            RemindReducer.run(state, RemindAction::Inner(RemindInner::ContentRemoved(1)));
        assert_eq!(state.today, vec![content(2)]);
        assert!(state.unread.is_empty());
        assert!(state.favorites.is_empty());
    }
}
