//! Launch screen deciding between auto login and the login flow.

use crate::environment::ClientError;
use crate::runtime::{Action, Category, Effect, EffectKey, Reducer, State};

const AUTO_LOGIN: EffectKey = EffectKey::new("splash.auto_login");

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplashState {
    pub checking: bool,
}

impl State for SplashState {}

#[derive(Debug, Clone, PartialEq)]
pub enum SplashAction {
    View(SplashView),
    Inner(SplashInner),
    Async(SplashAsync),
    Delegate(SplashDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SplashView {
    OnAppear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SplashInner {
    AutoLoginChecked(bool),
    AutoLoginFailed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SplashAsync {
    AutoLogin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SplashDelegate {
    AutoLoginSuccess,
    LoginNeeded,
}

impl Action for SplashAction {
    fn category(&self) -> Category {
        match self {
            SplashAction::View(_) => Category::View,
            SplashAction::Inner(_) => Category::Inner,
            SplashAction::Async(_) => Category::Async,
            SplashAction::Delegate(_) => Category::Delegate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SplashReducer;

impl Reducer for SplashReducer {
    type State = SplashState;
    type Action = SplashAction;

    fn reduce(&self, state: &mut SplashState, action: SplashAction) -> Effect<SplashAction> {
        match action {
            SplashAction::View(SplashView::OnAppear) => {
                Effect::send(SplashAction::Async(SplashAsync::AutoLogin))
            }
            SplashAction::Inner(inner) => {
                state.checking = false;
                let delegate = match inner {
                    SplashInner::AutoLoginChecked(true) => SplashDelegate::AutoLoginSuccess,
                    SplashInner::AutoLoginChecked(false) => SplashDelegate::LoginNeeded,
                    SplashInner::AutoLoginFailed(error) => {
                        tracing::info!(%error, "auto login failed, showing login");
                        SplashDelegate::LoginNeeded
                    }
                };
                Effect::send(SplashAction::Delegate(delegate))
            }
            SplashAction::Async(SplashAsync::AutoLogin) => {
                state.checking = true;
                Effect::task(
                    |env| async move {
                        env.auth
                            .auto_login()
                            .await
                            .map(|ok| SplashAction::Inner(SplashInner::AutoLoginChecked(ok)))
                    },
                    |error| SplashAction::Inner(SplashInner::AutoLoginFailed(error)),
                )
                .cancellable(AUTO_LOGIN)
            }
            SplashAction::Delegate(_) => Effect::none(),
        }
    }
}
