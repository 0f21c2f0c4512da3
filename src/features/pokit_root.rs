//! Pokit tab: the user's categories.

use crate::domain::Category;
use crate::environment::ClientError;
use crate::runtime::{
    Action, Category as ActionCategory, Effect, EffectKey, IdentifiedVec, Reducer, State,
};

const FETCH_CATEGORIES: EffectKey = EffectKey::new("pokit_root.fetch_categories");

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PokitRootState {
    pub categories: IdentifiedVec<u64, Category>,
    pub loading: bool,
    pub alert: Option<String>,
}

impl State for PokitRootState {}

#[derive(Debug, Clone, PartialEq)]
pub enum PokitRootAction {
    View(PokitRootView),
    Inner(PokitRootInner),
    Async(PokitRootAsync),
    Delegate(PokitRootDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PokitRootView {
    OnAppear,
    CategoryTapped(u64),
    SettingTapped,
    AlertDismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PokitRootInner {
    CategoriesLoaded(Vec<Category>),
    FetchFailed(ClientError),
    /// A category was deleted elsewhere; drop it from the list.
    CategoryRemoved(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PokitRootAsync {
    FetchCategories,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PokitRootDelegate {
    CategoryTapped(Category),
    SettingTapped,
}

impl Action for PokitRootAction {
    fn category(&self) -> ActionCategory {
        match self {
            PokitRootAction::View(_) => ActionCategory::View,
            PokitRootAction::Inner(_) => ActionCategory::Inner,
            PokitRootAction::Async(_) => ActionCategory::Async,
            PokitRootAction::Delegate(_) => ActionCategory::Delegate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PokitRootReducer;

impl Reducer for PokitRootReducer {
    type State = PokitRootState;
    type Action = PokitRootAction;

    fn reduce(&self, state: &mut PokitRootState, action: PokitRootAction) -> Effect<PokitRootAction> {
        match action {
            PokitRootAction::View(view) => match view {
                PokitRootView::OnAppear => {
                    Effect::send(PokitRootAction::Async(PokitRootAsync::FetchCategories))
                }
                PokitRootView::CategoryTapped(id) => match state.categories.get(&id) {
                    Some(category) => Effect::send(PokitRootAction::Delegate(
                        PokitRootDelegate::CategoryTapped(category.clone()),
                    )),
                    None => {
                        tracing::trace!(id, "tapped unknown category");
                        Effect::none()
                    }
                },
                PokitRootView::SettingTapped => {
                    Effect::send(PokitRootAction::Delegate(PokitRootDelegate::SettingTapped))
                }
                PokitRootView::AlertDismissed => {
                    state.alert = None;
                    Effect::none()
                }
            },
            PokitRootAction::Inner(inner) => {
                match inner {
                    PokitRootInner::CategoriesLoaded(categories) => {
                        state.loading = false;
                        state.categories = categories.into_iter().collect();
                    }
                    PokitRootInner::FetchFailed(error) => {
                        state.loading = false;
                        state.alert = Some(error.to_string());
                    }
                    PokitRootInner::CategoryRemoved(id) => {
                        state.categories.remove(&id);
                    }
                }
                Effect::none()
            }
            PokitRootAction::Async(PokitRootAsync::FetchCategories) => {
                state.loading = true;
                Effect::task(
                    |env| async move {
                        let categories = env.category.categories().await;
                        categories.map(|categories| {
                            PokitRootAction::Inner(PokitRootInner::CategoriesLoaded(categories))
                        })
                    },
                    |error| PokitRootAction::Inner(PokitRootInner::FetchFailed(error)),
                )
                .cancellable(FETCH_CATEGORIES)
            }
            PokitRootAction::Delegate(_) => Effect::none(),
        }
    }
}
