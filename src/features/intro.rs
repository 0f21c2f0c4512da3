//! Pre-login flow: splash first, then the login screens when needed.

use crate::config::TimingConfig;
use crate::runtime::{Action, Case, Category, Effect, IfCaseLet, Reducer, State};

use super::login::sign_up_done::SignUpDoneDelegate;
use super::login::{
    LoginRootAction, LoginRootDelegate, LoginRootReducer, LoginRootScope, LoginRootState,
};
use super::splash::{SplashAction, SplashDelegate, SplashReducer, SplashState};

#[derive(Debug, Clone, PartialEq)]
pub enum IntroState {
    Splash(SplashState),
    Login(LoginRootState),
}

impl Default for IntroState {
    fn default() -> Self {
        IntroState::Splash(SplashState::default())
    }
}

impl State for IntroState {}

#[derive(Debug, Clone, PartialEq)]
pub enum IntroAction {
    Splash(SplashAction),
    Login(LoginRootAction),
    Delegate(IntroDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntroDelegate {
    MoveToTab,
}

impl Action for IntroAction {
    fn category(&self) -> Category {
        match self {
            IntroAction::Splash(_) | IntroAction::Login(_) => Category::Child,
            IntroAction::Delegate(_) => Category::Delegate,
        }
    }
}

pub struct IntroReducer {
    inner: IfCaseLet<IfCaseLet<IntroCore, SplashReducer>, LoginRootReducer>,
}

impl IntroReducer {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            inner: IntroCore
                .if_case_let(
                    Case {
                        name: "splash",
                        state: splash_state,
                        action: splash_action,
                        embed: IntroAction::Splash,
                    },
                    SplashReducer,
                )
                .if_case_let(
                    Case {
                        name: "login",
                        state: login_state,
                        action: login_action,
                        embed: IntroAction::Login,
                    },
                    LoginRootReducer::new(timing),
                ),
        }
    }
}

impl Reducer for IntroReducer {
    type State = IntroState;
    type Action = IntroAction;

    fn reduce(&self, state: &mut IntroState, action: IntroAction) -> Effect<IntroAction> {
        self.inner.reduce(state, action)
    }
}

fn splash_state(state: &mut IntroState) -> Option<&mut SplashState> {
    match state {
        IntroState::Splash(splash) => Some(splash),
        IntroState::Login(_) => None,
    }
}

fn splash_action(action: &IntroAction) -> Option<&SplashAction> {
    match action {
        IntroAction::Splash(action) => Some(action),
        _ => None,
    }
}

fn login_state(state: &mut IntroState) -> Option<&mut LoginRootState> {
    match state {
        IntroState::Login(login) => Some(login),
        IntroState::Splash(_) => None,
    }
}

fn login_action(action: &IntroAction) -> Option<&LoginRootAction> {
    match action {
        IntroAction::Login(action) => Some(action),
        _ => None,
    }
}

struct IntroCore;

impl Reducer for IntroCore {
    type State = IntroState;
    type Action = IntroAction;

    fn reduce(&self, state: &mut IntroState, action: IntroAction) -> Effect<IntroAction> {
        match action {
            IntroAction::Splash(SplashAction::Delegate(delegate)) => match delegate {
                SplashDelegate::AutoLoginSuccess => {
                    Effect::send(IntroAction::Delegate(IntroDelegate::MoveToTab))
                }
                SplashDelegate::LoginNeeded => {
                    tracing::debug!("switching to login");
                    *state = IntroState::Login(LoginRootState::default());
                    Effect::none()
                }
            },
            IntroAction::Login(LoginRootAction::Delegate(delegate)) => match delegate {
                LoginRootDelegate::ExistingUserLoggedIn => {
                    Effect::send(IntroAction::Delegate(IntroDelegate::MoveToTab))
                }
            },
            IntroAction::Login(LoginRootAction::Scope(LoginRootScope::SignUpDone(delegate))) => {
                match delegate {
                    SignUpDoneDelegate::DismissLoginRootView => {
                        Effect::send(IntroAction::Delegate(IntroDelegate::MoveToTab))
                    }
                }
            }
            _ => Effect::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reducer() -> IntroReducer {
        IntroReducer::new(&TimingConfig::default())
    }

    #[test]
    fn login_needed_switches_scene() {
        let (state, effect) = reducer().run(
            IntroState::default(),
            IntroAction::Splash(SplashAction::Delegate(SplashDelegate::LoginNeeded)),
        );
        assert_eq!(state, IntroState::Login(LoginRootState::default()));
        assert!(effect.actions().is_empty());
        assert_eq!(effect.operations(), 0);
    }

    #[test]
    fn auto_login_moves_to_tab() {
        let (_, effect) = reducer().run(
            IntroState::default(),
            IntroAction::Splash(SplashAction::Delegate(SplashDelegate::AutoLoginSuccess)),
        );
        assert_eq!(
            effect.actions(),
            vec![&IntroAction::Delegate(IntroDelegate::MoveToTab)]
        );
    }

    #[test]
    fn finished_sign_up_moves_to_tab() {
        let (_, effect) = reducer().run(
            IntroState::Login(LoginRootState::default()),
            IntroAction::Login(LoginRootAction::Scope(LoginRootScope::SignUpDone(
                SignUpDoneDelegate::DismissLoginRootView,
            ))),
        );
        assert_eq!(
            effect.actions(),
            vec![&IntroAction::Delegate(IntroDelegate::MoveToTab)]
        );
    }

    #[test]
    fn late_splash_delegate_keeps_login_progress() {
        let login = IntroState::Login(LoginRootState {
            nickname: "pokit".to_string(),
            alert: Some("failed".to_string()),
            ..LoginRootState::default()
        });
        let (state, effect) = reducer().run(
            login.clone(),
            IntroAction::Splash(SplashAction::Delegate(SplashDelegate::LoginNeeded)),
        );
        assert_eq!(state, login);
        assert!(effect.is_none());
    }

    #[test]
    fn login_action_dropped_while_splash_shown() {
        let (state, effect) = reducer().run(
            IntroState::default(),
            IntroAction::Login(LoginRootAction::View(
                crate::features::login::LoginRootView::AppleLoginTapped,
            )),
        );
        assert_eq!(state, IntroState::default());
        assert!(effect.is_none());
    }
}
