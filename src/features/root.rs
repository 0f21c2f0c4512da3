//! Top of the feature tree: the intro flow or the signed-in shell.

use crate::config::TimingConfig;
use crate::runtime::{Action, Case, Category, Effect, IfCaseLet, Reducer, State};

use super::intro::{IntroAction, IntroDelegate, IntroReducer, IntroState};
use super::login::LoginRootState;
use super::main_tab::{MainTabAction, MainTabDelegate, MainTabReducer, MainTabState};

#[derive(Debug, Clone, PartialEq)]
pub enum RootState {
    Intro(IntroState),
    MainTab(MainTabState),
}

impl Default for RootState {
    fn default() -> Self {
        RootState::Intro(IntroState::default())
    }
}

impl State for RootState {}

#[derive(Debug, Clone, PartialEq)]
pub enum RootAction {
    Intro(IntroAction),
    MainTab(MainTabAction),
}

impl Action for RootAction {
    fn category(&self) -> Category {
        Category::Child
    }
}

pub struct RootReducer {
    inner: IfCaseLet<IfCaseLet<RootCore, IntroReducer>, MainTabReducer>,
}

impl RootReducer {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            inner: RootCore
                .if_case_let(
                    Case {
                        name: "intro",
                        state: intro_state,
                        action: intro_action,
                        embed: RootAction::Intro,
                    },
                    IntroReducer::new(timing),
                )
                .if_case_let(
                    Case {
                        name: "main_tab",
                        state: main_tab_state,
                        action: main_tab_action,
                        embed: RootAction::MainTab,
                    },
                    MainTabReducer::new(timing),
                ),
        }
    }
}

impl Reducer for RootReducer {
    type State = RootState;
    type Action = RootAction;

    fn reduce(&self, state: &mut RootState, action: RootAction) -> Effect<RootAction> {
        self.inner.reduce(state, action)
    }
}

fn intro_state(state: &mut RootState) -> Option<&mut IntroState> {
    match state {
        RootState::Intro(intro) => Some(intro),
        RootState::MainTab(_) => None,
    }
}

fn intro_action(action: &RootAction) -> Option<&IntroAction> {
    match action {
        RootAction::Intro(action) => Some(action),
        RootAction::MainTab(_) => None,
    }
}

fn main_tab_state(state: &mut RootState) -> Option<&mut MainTabState> {
    match state {
        RootState::MainTab(main_tab) => Some(main_tab),
        RootState::Intro(_) => None,
    }
}

fn main_tab_action(action: &RootAction) -> Option<&MainTabAction> {
    match action {
        RootAction::MainTab(action) => Some(action),
        RootAction::Intro(_) => None,
    }
}

struct RootCore;

impl Reducer for RootCore {
    type State = RootState;
    type Action = RootAction;

    fn reduce(&self, state: &mut RootState, action: RootAction) -> Effect<RootAction> {
        match action {
            RootAction::Intro(IntroAction::Delegate(delegate)) => match delegate {
                IntroDelegate::MoveToTab => {
                    tracing::info!("entering main tab");
                    *state = RootState::MainTab(MainTabState::default());
                }
            },
            RootAction::MainTab(MainTabAction::Delegate(delegate)) => {
                match delegate {
                    MainTabDelegate::Logout => tracing::info!("logged out"),
                    MainTabDelegate::Withdraw => tracing::info!("account withdrawn"),
                }
                *state = RootState::Intro(IntroState::Login(LoginRootState::default()));
            }
            _ => {}
        }
        Effect::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reducer() -> RootReducer {
        RootReducer::new(&TimingConfig::default())
    }

    #[test]
    fn move_to_tab_replaces_intro() {
        let (state, effect) = reducer().run(
            RootState::default(),
            RootAction::Intro(IntroAction::Delegate(IntroDelegate::MoveToTab)),
        );
        assert_eq!(state, RootState::MainTab(MainTabState::default()));
        assert!(effect.actions().is_empty());
    }

    #[test]
    fn withdraw_returns_to_login() {
        let (state, _) = reducer().run(
            RootState::MainTab(MainTabState::default()),
            RootAction::MainTab(MainTabAction::Delegate(MainTabDelegate::Withdraw)),
        );
        assert_eq!(
            state,
            RootState::Intro(IntroState::Login(LoginRootState::default()))
        );
    }
}
