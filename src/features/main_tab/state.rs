use crate::features::content_detail::ContentDetailState;
use crate::features::pokit_root::PokitRootState;
use crate::features::remind::RemindState;
use crate::runtime::{PresentationState, StackState, State};

use super::path::MainTabPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Pokit,
    Remind,
}

/// Signed-in shell: two tabs, a navigation stack, and a content sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MainTabState {
    pub selected_tab: Tab,
    pub pokit: PokitRootState,
    pub remind: RemindState,
    pub path: StackState<MainTabPath>,
    pub content_detail: PresentationState<ContentDetailState>,
    /// Link seen on the clipboard, offered as a new content.
    pub copied_link: Option<String>,
}

impl State for MainTabState {}
