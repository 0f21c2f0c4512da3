//! Screens pushed onto the main navigation stack.

use crate::config::TimingConfig;
use crate::runtime::{Action, BindingReducer, Category, Effect, Reducer, Segment, State};

use crate::features::category_detail::{
    CategoryDetailAction, CategoryDetailReducer, CategoryDetailState,
};
use crate::features::content_list::{ContentListAction, ContentListReducer, ContentListState};
use crate::features::content_setting::{
    ContentSettingAction, ContentSettingReducer, ContentSettingState,
};
use crate::features::nickname_setting::{
    NicknameSettingAction, NicknameSettingReducer, NicknameSettingState,
};
use crate::features::setting::{SettingAction, SettingReducer, SettingState};

#[derive(Debug, Clone, PartialEq)]
pub enum MainTabPath {
    CategoryDetail(CategoryDetailState),
    ContentList(ContentListState),
    ContentSetting(ContentSettingState),
    Setting(SettingState),
    NicknameSetting(NicknameSettingState),
}

impl State for MainTabPath {}

#[derive(Debug, Clone, PartialEq)]
pub enum MainTabPathAction {
    CategoryDetail(CategoryDetailAction),
    ContentList(ContentListAction),
    ContentSetting(ContentSettingAction),
    Setting(SettingAction),
    NicknameSetting(NicknameSettingAction),
}

impl Action for MainTabPathAction {
    fn category(&self) -> Category {
        Category::Child
    }
}

pub struct MainTabPathReducer {
    category_detail: CategoryDetailReducer,
    content_list: ContentListReducer,
    content_setting: BindingReducer<ContentSettingReducer>,
    setting: SettingReducer,
    nickname_setting: BindingReducer<NicknameSettingReducer>,
}

impl MainTabPathReducer {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            category_detail: CategoryDetailReducer,
            content_list: ContentListReducer,
            content_setting: ContentSettingReducer::new(timing).with_bindings(),
            setting: SettingReducer,
            nickname_setting: NicknameSettingReducer::new(timing).with_bindings(),
        }
    }
}

impl Reducer for MainTabPathReducer {
    type State = MainTabPath;
    type Action = MainTabPathAction;

    fn reduce(&self, state: &mut MainTabPath, action: MainTabPathAction) -> Effect<MainTabPathAction> {
        match (state, action) {
            (MainTabPath::CategoryDetail(state), MainTabPathAction::CategoryDetail(action)) => self
                .category_detail
                .reduce(state, action)
                .scoped(Segment::Case("category_detail"), MainTabPathAction::CategoryDetail),
            (MainTabPath::ContentList(state), MainTabPathAction::ContentList(action)) => self
                .content_list
                .reduce(state, action)
                .scoped(Segment::Case("content_list"), MainTabPathAction::ContentList),
            (MainTabPath::ContentSetting(state), MainTabPathAction::ContentSetting(action)) => self
                .content_setting
                .reduce(state, action)
                .scoped(Segment::Case("content_setting"), MainTabPathAction::ContentSetting),
            (MainTabPath::Setting(state), MainTabPathAction::Setting(action)) => self
                .setting
                .reduce(state, action)
                .scoped(Segment::Case("setting"), MainTabPathAction::Setting),
            (MainTabPath::NicknameSetting(state), MainTabPathAction::NicknameSetting(action)) => {
                self.nickname_setting
                    .reduce(state, action)
                    .scoped(Segment::Case("nickname_setting"), MainTabPathAction::NicknameSetting)
            }
            (_, action) => {
                tracing::trace!(?action, "action does not match screen");
                Effect::none()
            }
        }
    }
}
