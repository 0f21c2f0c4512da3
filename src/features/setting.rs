//! Account settings.

use crate::environment::ClientError;
use crate::runtime::{Action, Category, Effect, EffectKey, Reducer, State};

const ACCOUNT: EffectKey = EffectKey::new("setting.account");

/// Account action waiting for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountConfirm {
    Logout,
    Withdraw,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingState {
    pub confirm: Option<AccountConfirm>,
    pub in_progress: bool,
    pub alert: Option<String>,
}

impl State for SettingState {}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingAction {
    View(SettingView),
    Inner(SettingInner),
    Async(SettingAsync),
    Delegate(SettingDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingView {
    NicknameTapped,
    OpenSettingsTapped,
    LogoutTapped,
    WithdrawTapped,
    Confirmed,
    ConfirmDismissed,
    AlertDismissed,
    BackTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingInner {
    LoggedOut,
    Withdrawn,
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingAsync {
    OpenSettings,
    Logout,
    Withdraw,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingDelegate {
    NicknameTapped,
    Logout,
    Withdraw,
}

impl Action for SettingAction {
    fn category(&self) -> Category {
        match self {
            SettingAction::View(_) => Category::View,
            SettingAction::Inner(_) => Category::Inner,
            SettingAction::Async(_) => Category::Async,
            SettingAction::Delegate(_) => Category::Delegate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SettingReducer;

impl Reducer for SettingReducer {
    type State = SettingState;
    type Action = SettingAction;

    fn reduce(&self, state: &mut SettingState, action: SettingAction) -> Effect<SettingAction> {
        match action {
            SettingAction::View(view) => match view {
                SettingView::NicknameTapped => {
                    Effect::send(SettingAction::Delegate(SettingDelegate::NicknameTapped))
                }
                SettingView::OpenSettingsTapped => {
                    Effect::send(SettingAction::Async(SettingAsync::OpenSettings))
                }
                SettingView::LogoutTapped => {
                    state.confirm = Some(AccountConfirm::Logout);
                    Effect::none()
                }
                SettingView::WithdrawTapped => {
                    state.confirm = Some(AccountConfirm::Withdraw);
                    Effect::none()
                }
                SettingView::Confirmed => match state.confirm.take() {
                    Some(AccountConfirm::Logout) => {
                        Effect::send(SettingAction::Async(SettingAsync::Logout))
                    }
                    Some(AccountConfirm::Withdraw) => {
                        Effect::send(SettingAction::Async(SettingAsync::Withdraw))
                    }
                    None => Effect::none(),
                },
                SettingView::ConfirmDismissed => {
                    state.confirm = None;
                    Effect::none()
                }
                SettingView::AlertDismissed => {
                    state.alert = None;
                    Effect::none()
                }
                SettingView::BackTapped => Effect::dismiss(),
            },
            SettingAction::Inner(inner) => {
                state.in_progress = false;
                match inner {
                    SettingInner::LoggedOut => {
                        Effect::send(SettingAction::Delegate(SettingDelegate::Logout))
                    }
                    SettingInner::Withdrawn => {
                        Effect::send(SettingAction::Delegate(SettingDelegate::Withdraw))
                    }
                    SettingInner::Failed(error) => {
                        state.alert = Some(error.to_string());
                        Effect::none()
                    }
                }
            }
            SettingAction::Async(request) => match request {
                SettingAsync::OpenSettings => Effect::run(|env, _send| async move {
                    env.settings.open_settings().await;
                }),
                SettingAsync::Logout => {
                    state.in_progress = true;
                    Effect::task(
                        |env| async move {
                            let done = env.auth.logout().await;
                            done.map(|()| SettingAction::Inner(SettingInner::LoggedOut))
                        },
                        |error| SettingAction::Inner(SettingInner::Failed(error)),
                    )
                    .cancellable(ACCOUNT)
                }
                SettingAsync::Withdraw => {
                    state.in_progress = true;
                    Effect::task(
                        |env| async move {
                            let done = env.auth.withdraw().await;
                            done.map(|()| SettingAction::Inner(SettingInner::Withdrawn))
                        },
                        |error| SettingAction::Inner(SettingInner::Failed(error)),
                    )
                    .cancellable(ACCOUNT)
                }
            },
            SettingAction::Delegate(_) => Effect::none(),
        }
    }
}
