use crate::features::content_detail::ContentDetailAction;
use crate::features::pokit_root::PokitRootAction;
use crate::features::remind::RemindAction;
use crate::runtime::{Action, Category, PresentationAction, StackAction};

use super::path::{MainTabPath, MainTabPathAction};
use super::state::Tab;

#[derive(Debug, Clone, PartialEq)]
pub enum MainTabAction {
    View(MainTabView),
    Inner(MainTabInner),
    Delegate(MainTabDelegate),
    Pokit(PokitRootAction),
    Remind(RemindAction),
    ContentDetail(PresentationAction<ContentDetailAction>),
    Path(StackAction<MainTabPath, MainTabPathAction>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MainTabView {
    TabSelected(Tab),
    AddLinkTapped,
    LinkPopupTapped,
    LinkPopupDismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MainTabInner {
    OpenContentSetting { content_id: u64 },
    PresentContentDetail { content_id: u64 },
    LinkCopied(String),
    ContentRemoved(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MainTabDelegate {
    Logout,
    Withdraw,
}

impl Action for MainTabAction {
    fn category(&self) -> Category {
        match self {
            MainTabAction::View(_) => Category::View,
            MainTabAction::Inner(_) => Category::Inner,
            MainTabAction::Delegate(_) => Category::Delegate,
            MainTabAction::Pokit(_)
            | MainTabAction::Remind(_)
            | MainTabAction::ContentDetail(_)
            | MainTabAction::Path(_) => Category::Child,
        }
    }
}
