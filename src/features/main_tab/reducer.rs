use crate::config::TimingConfig;
use crate::domain::ContentListKind;
use crate::features::category_detail::{
    CategoryDetailAction, CategoryDetailDelegate, CategoryDetailInner, CategoryDetailState,
};
use crate::features::content_detail::{
    ContentDetailAction, ContentDetailDelegate, ContentDetailReducer, ContentDetailState,
};
use crate::features::content_list::{
    ContentListAction, ContentListDelegate, ContentListInner, ContentListState,
};
use crate::features::content_setting::{
    ContentSettingAction, ContentSettingDelegate, ContentSettingState,
};
use crate::features::nickname_setting::NicknameSettingState;
use crate::features::pokit_root::{
    PokitRootAction, PokitRootDelegate, PokitRootInner, PokitRootReducer, PokitRootState,
};
use crate::features::remind::{
    RemindAction, RemindAsync, RemindDelegate, RemindInner, RemindReducer, RemindState,
};
use crate::features::setting::{SettingAction, SettingDelegate, SettingState};
use crate::runtime::{
    Effect, Field, FieldScope, ForEachStack, IfLet, PresentationAction, PresentationState,
    Presented, Reducer, Stack, StackAction, StackElementId, StackState,
};

use super::action::{MainTabAction, MainTabDelegate, MainTabInner, MainTabView};
use super::path::{MainTabPath, MainTabPathAction, MainTabPathReducer};
use super::state::MainTabState;

type Composed = ForEachStack<
    IfLet<FieldScope<FieldScope<MainTabCore, PokitRootReducer>, RemindReducer>, ContentDetailReducer>,
    MainTabPathReducer,
>;

pub struct MainTabReducer {
    inner: Composed,
}

impl MainTabReducer {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            inner: MainTabCore
                .scope(
                    Field {
                        name: "pokit",
                        state: pokit_state,
                        action: pokit_action,
                        embed: MainTabAction::Pokit,
                    },
                    PokitRootReducer,
                )
                .scope(
                    Field {
                        name: "remind",
                        state: remind_state,
                        action: remind_action,
                        embed: MainTabAction::Remind,
                    },
                    RemindReducer,
                )
                .if_let(
                    Presented {
                        name: "content_detail",
                        state: content_detail_state,
                        action: content_detail_action,
                        embed: MainTabAction::ContentDetail,
                    },
                    ContentDetailReducer,
                )
                .for_each_stack(
                    Stack {
                        name: "path",
                        state: path_state,
                        action: path_action,
                        embed: MainTabAction::Path,
                    },
                    MainTabPathReducer::new(timing),
                ),
        }
    }
}

impl Reducer for MainTabReducer {
    type State = MainTabState;
    type Action = MainTabAction;

    fn reduce(&self, state: &mut MainTabState, action: MainTabAction) -> Effect<MainTabAction> {
        self.inner.reduce(state, action)
    }
}

fn pokit_state(state: &mut MainTabState) -> &mut PokitRootState {
    &mut state.pokit
}

fn pokit_action(action: &MainTabAction) -> Option<&PokitRootAction> {
    match action {
        MainTabAction::Pokit(action) => Some(action),
        _ => None,
    }
}

fn remind_state(state: &mut MainTabState) -> &mut RemindState {
    &mut state.remind
}

fn remind_action(action: &MainTabAction) -> Option<&RemindAction> {
    match action {
        MainTabAction::Remind(action) => Some(action),
        _ => None,
    }
}

fn content_detail_state(state: &mut MainTabState) -> &mut PresentationState<ContentDetailState> {
    &mut state.content_detail
}

fn content_detail_action(
    action: &MainTabAction,
) -> Option<&PresentationAction<ContentDetailAction>> {
    match action {
        MainTabAction::ContentDetail(action) => Some(action),
        _ => None,
    }
}

fn path_state(state: &mut MainTabState) -> &mut StackState<MainTabPath> {
    &mut state.path
}

fn path_action(action: &MainTabAction) -> Option<&StackAction<MainTabPath, MainTabPathAction>> {
    match action {
        MainTabAction::Path(action) => Some(action),
        _ => None,
    }
}

fn push(screen: MainTabPath) -> Effect<MainTabAction> {
    Effect::send(MainTabAction::Path(StackAction::Push { state: screen }))
}

fn inner(action: MainTabInner) -> Effect<MainTabAction> {
    Effect::send(MainTabAction::Inner(action))
}

struct MainTabCore;

impl Reducer for MainTabCore {
    type State = MainTabState;
    type Action = MainTabAction;

    fn reduce(&self, state: &mut MainTabState, action: MainTabAction) -> Effect<MainTabAction> {
        match action {
            MainTabAction::View(view) => self.handle_view(view, state),
            MainTabAction::Inner(action) => self.handle_inner(action, state),
            MainTabAction::Pokit(PokitRootAction::Delegate(delegate)) => match delegate {
                PokitRootDelegate::CategoryTapped(category) => {
                    push(MainTabPath::CategoryDetail(CategoryDetailState::new(category)))
                }
                PokitRootDelegate::SettingTapped => push(MainTabPath::Setting(SettingState::default())),
            },
            MainTabAction::Remind(RemindAction::Delegate(delegate)) => match delegate {
                RemindDelegate::ContentTapped(content_id) => {
                    inner(MainTabInner::PresentContentDetail { content_id })
                }
                RemindDelegate::EditContent(content_id) => {
                    inner(MainTabInner::OpenContentSetting { content_id })
                }
                RemindDelegate::ShowUnread => {
                    push(MainTabPath::ContentList(ContentListState::new(ContentListKind::Unread)))
                }
                RemindDelegate::ShowFavorites => push(MainTabPath::ContentList(
                    ContentListState::new(ContentListKind::Favorite),
                )),
            },
            MainTabAction::ContentDetail(PresentationAction::Presented(
                ContentDetailAction::Delegate(delegate),
            )) => {
                state.content_detail.dismiss();
                match delegate {
                    ContentDetailDelegate::EditTapped { content_id } => {
                        inner(MainTabInner::OpenContentSetting { content_id })
                    }
                    ContentDetailDelegate::ContentDeleted { content_id } => {
                        inner(MainTabInner::ContentRemoved(content_id))
                    }
                }
            }
            MainTabAction::Path(StackAction::Element { id, action }) => {
                self.handle_path(id, action, state)
            }
            _ => Effect::none(),
        }
    }
}

impl MainTabCore {
    fn handle_view(&self, action: MainTabView, state: &mut MainTabState) -> Effect<MainTabAction> {
        match action {
            MainTabView::TabSelected(tab) => {
                state.selected_tab = tab;
                Effect::none()
            }
            MainTabView::AddLinkTapped => {
                push(MainTabPath::ContentSetting(ContentSettingState::default()))
            }
            MainTabView::LinkPopupTapped => match state.copied_link.take() {
                Some(url) => push(MainTabPath::ContentSetting(ContentSettingState::with_url(url))),
                None => Effect::none(),
            },
            MainTabView::LinkPopupDismissed => {
                state.copied_link = None;
                Effect::none()
            }
        }
    }

    fn handle_inner(&self, action: MainTabInner, state: &mut MainTabState) -> Effect<MainTabAction> {
        match action {
            MainTabInner::OpenContentSetting { content_id } => {
                push(MainTabPath::ContentSetting(ContentSettingState::edit(content_id)))
            }
            MainTabInner::PresentContentDetail { content_id } => {
                state.content_detail.present(ContentDetailState::new(content_id));
                Effect::none()
            }
            MainTabInner::LinkCopied(url) => {
                state.copied_link = Some(url);
                Effect::none()
            }
            MainTabInner::ContentRemoved(content_id) => {
                let lists = state.path.iter().filter_map(|(id, screen)| {
                    let action = match screen {
                        MainTabPath::CategoryDetail(_) => MainTabPathAction::CategoryDetail(
                            CategoryDetailAction::Inner(CategoryDetailInner::ContentRemoved(
                                content_id,
                            )),
                        ),
                        MainTabPath::ContentList(_) => MainTabPathAction::ContentList(
                            ContentListAction::Inner(ContentListInner::ContentRemoved(content_id)),
                        ),
                        _ => return None,
                    };
                    Some(Effect::send(MainTabAction::Path(StackAction::Element {
                        id: *id,
                        action,
                    })))
                });
                Effect::send(MainTabAction::Remind(RemindAction::Inner(
                    RemindInner::ContentRemoved(content_id),
                )))
                .and(Effect::merge(lists.collect::<Vec<_>>()))
            }
        }
    }

    /// Routes delegate outcomes of pushed screens.
    fn handle_path(
        &self,
        id: StackElementId,
        action: MainTabPathAction,
        state: &mut MainTabState,
    ) -> Effect<MainTabAction> {
        match action {
            MainTabPathAction::CategoryDetail(CategoryDetailAction::Delegate(delegate)) => {
                match delegate {
                    CategoryDetailDelegate::ContentTapped(content_id) => {
                        inner(MainTabInner::PresentContentDetail { content_id })
                    }
                    CategoryDetailDelegate::EditContent(content_id) => {
                        inner(MainTabInner::OpenContentSetting { content_id })
                    }
                    CategoryDetailDelegate::CategoryDeleted(category_id) => {
                        state.path.remove(&id);
                        Effect::send(MainTabAction::Pokit(PokitRootAction::Inner(
                            PokitRootInner::CategoryRemoved(category_id),
                        )))
                    }
                    CategoryDetailDelegate::LinkCopyDetected(url) => {
                        inner(MainTabInner::LinkCopied(url))
                    }
                }
            }
            MainTabPathAction::ContentList(ContentListAction::Delegate(delegate)) => match delegate {
                ContentListDelegate::ContentTapped(content_id) => {
                    inner(MainTabInner::PresentContentDetail { content_id })
                }
            },
            MainTabPathAction::ContentSetting(ContentSettingAction::Delegate(delegate)) => {
                match delegate {
                    ContentSettingDelegate::Saved(content) => {
                        tracing::debug!(content_id = content.id, "content saved");
                        state.path.remove(&id);
                        Effect::send(MainTabAction::Remind(RemindAction::Async(
                            RemindAsync::RefreshAll,
                        )))
                    }
                }
            }
            MainTabPathAction::Setting(SettingAction::Delegate(delegate)) => match delegate {
                SettingDelegate::NicknameTapped => {
                    push(MainTabPath::NicknameSetting(NicknameSettingState::default()))
                }
                SettingDelegate::Logout => {
                    Effect::send(MainTabAction::Delegate(MainTabDelegate::Logout))
                }
                SettingDelegate::Withdraw => {
                    Effect::send(MainTabAction::Delegate(MainTabDelegate::Withdraw))
                }
            },
            _ => Effect::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn reducer() -> MainTabReducer {
        MainTabReducer::new(&TimingConfig::default())
    }

    fn category(id: u64) -> Category {
        Category {
            id,
            name: "Recipes".to_string(),
            image_url: None,
            content_count: 0,
        }
    }

    #[test]
    fn tapped_category_is_pushed() {
        let (_, effect) = reducer().run(
            MainTabState::default(),
            MainTabAction::Pokit(PokitRootAction::Delegate(PokitRootDelegate::CategoryTapped(
                category(3),
            ))),
        );
        assert_eq!(
            effect.actions(),
            vec![&MainTabAction::Path(StackAction::Push {
                state: MainTabPath::CategoryDetail(CategoryDetailState::new(category(3)))
            })]
        );
    }

    #[test]
    fn deleted_category_leaves_stack_and_list() {
        let mut state = MainTabState::default();
        let id = state
            .path
            .push(MainTabPath::CategoryDetail(CategoryDetailState::new(category(3))));
        let (state, effect) = reducer().run(
            state,
            MainTabAction::Path(StackAction::Element {
                id,
                action: MainTabPathAction::CategoryDetail(CategoryDetailAction::Delegate(
                    CategoryDetailDelegate::CategoryDeleted(3),
                )),
            }),
        );
        assert!(state.path.is_empty());
        assert_eq!(
            effect.actions(),
            vec![&MainTabAction::Pokit(PokitRootAction::Inner(
                PokitRootInner::CategoryRemoved(3)
            ))]
        );
    }

    #[test]
    fn edit_from_sheet_closes_it_and_opens_setting() {
        let mut state = MainTabState::default();
        state.content_detail.present(ContentDetailState::new(8));
        let (state, effect) = reducer().run(
            state,
            MainTabAction::ContentDetail(PresentationAction::Presented(
                ContentDetailAction::Delegate(ContentDetailDelegate::EditTapped { content_id: 8 }),
            )),
        );
        assert!(!state.content_detail.is_presented());
        assert_eq!(
            effect.actions(),
            vec![&MainTabAction::Inner(MainTabInner::OpenContentSetting {
                content_id: 8
            })]
        );
    }

    #[test]
    fn logout_goes_up() {
        let mut state = MainTabState::default();
        let id = state.path.push(MainTabPath::Setting(SettingState::default()));
        let (_, effect) = reducer().run(
            state,
            MainTabAction::Path(StackAction::Element {
                id,
                action: MainTabPathAction::Setting(SettingAction::Delegate(SettingDelegate::Logout)),
            }),
        );
        assert_eq!(
            effect.actions(),
            vec![&MainTabAction::Delegate(MainTabDelegate::Logout)]
        );
    }

    #[test]
    fn popped_setting_cannot_log_out() {
        let mut state = MainTabState::default();
        let id = state.path.push(MainTabPath::Setting(SettingState::default()));
        let (state, _) = reducer().run(state, MainTabAction::Path(StackAction::PopFrom { id }));

        let (after, effect) = reducer().run(
            state.clone(),
            MainTabAction::Path(StackAction::Element {
                id,
                action: MainTabPathAction::Setting(SettingAction::Delegate(SettingDelegate::Logout)),
            }),
        );
        assert_eq!(after, state);
        assert!(effect.is_none());
    }

    #[test]
    fn popped_category_detail_cannot_remove_category() {
        let mut state = MainTabState::default();
        let id = state
            .path
            .push(MainTabPath::CategoryDetail(CategoryDetailState::new(category(3))));
        let (state, _) = reducer().run(state, MainTabAction::Path(StackAction::PopFrom { id }));

        let (after, effect) = reducer().run(
            state.clone(),
            MainTabAction::Path(StackAction::Element {
                id,
                action: MainTabPathAction::CategoryDetail(CategoryDetailAction::Delegate(
                    CategoryDetailDelegate::CategoryDeleted(3),
                )),
            }),
        );
        assert_eq!(after, state);
        assert!(effect.is_none());
    }

    #[test]
    fn sheet_action_after_dismiss_is_dropped() {
        let mut state = MainTabState::default();
        state.content_detail.present(ContentDetailState::new(8));
        state.content_detail.dismiss();

        let (after, effect) = reducer().run(
            state.clone(),
            MainTabAction::ContentDetail(PresentationAction::Presented(
                ContentDetailAction::Delegate(ContentDetailDelegate::EditTapped { content_id: 8 }),
            )),
        );
        assert_eq!(after, state);
        assert!(effect.is_none());
    }

    #[test]
    fn removed_content_reaches_open_lists() {
        let mut state = MainTabState::default();
        let list = state
            .path
            .push(MainTabPath::ContentList(ContentListState::new(ContentListKind::Unread)));
        state.path.push(MainTabPath::Setting(SettingState::default()));
        let (_, effect) = reducer().run(
            state,
            MainTabAction::Inner(MainTabInner::ContentRemoved(5)),
        );
        assert_eq!(
            effect.actions(),
            vec![
                &MainTabAction::Remind(RemindAction::Inner(RemindInner::ContentRemoved(5))),
                &MainTabAction::Path(StackAction::Element {
                    id: list,
                    action: MainTabPathAction::ContentList(ContentListAction::Inner(
                        ContentListInner::ContentRemoved(5)
                    )),
                }),
            ]
        );
    }
}
