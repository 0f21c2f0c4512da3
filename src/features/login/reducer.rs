use crate::config::TimingConfig;
use crate::domain::{SignUpRequest, SocialProvider};
use crate::environment::ClientError;
use crate::runtime::{Effect, EffectKey, ForEachStack, Reducer, Stack, StackAction, StackState};

use super::action::{
    LoginRootAction, LoginRootAsync, LoginRootDelegate, LoginRootInner, LoginRootScope,
    LoginRootView,
};
use super::agree_to_terms::{AgreeToTermsAction, AgreeToTermsDelegate, AgreeToTermsState};
use super::path::{LoginPath, LoginPathAction, LoginPathReducer};
use super::register_nickname::{RegisterNicknameAction, RegisterNicknameDelegate};
use super::select_field::{SelectFieldAction, SelectFieldDelegate, SelectFieldState};
use super::sign_up_done::{SignUpDoneAction, SignUpDoneDelegate, SignUpDoneState};
use super::state::LoginRootState;

const SOCIAL_LOGIN: EffectKey = EffectKey::new("login_root.social_login");
const SIGN_UP: EffectKey = EffectKey::new("login_root.sign_up");

/// Login root with its sign up stack attached.
pub struct LoginRootReducer {
    inner: ForEachStack<LoginRootCore, LoginPathReducer>,
}

impl LoginRootReducer {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            inner: LoginRootCore.for_each_stack(
                Stack {
                    name: "path",
                    state: path_state,
                    action: path_action,
                    embed: LoginRootAction::Path,
                },
                LoginPathReducer::new(timing),
            ),
        }
    }
}

impl Reducer for LoginRootReducer {
    type State = LoginRootState;
    type Action = LoginRootAction;

    fn reduce(&self, state: &mut LoginRootState, action: LoginRootAction) -> Effect<LoginRootAction> {
        self.inner.reduce(state, action)
    }
}

fn path_state(state: &mut LoginRootState) -> &mut StackState<LoginPath> {
    &mut state.path
}

fn path_action(action: &LoginRootAction) -> Option<&StackAction<LoginPath, LoginPathAction>> {
    match action {
        LoginRootAction::Path(action) => Some(action),
        _ => None,
    }
}

struct LoginRootCore;

impl Reducer for LoginRootCore {
    type State = LoginRootState;
    type Action = LoginRootAction;

    fn reduce(&self, state: &mut LoginRootState, action: LoginRootAction) -> Effect<LoginRootAction> {
        match action {
            LoginRootAction::View(view) => self.handle_view(view, state),
            LoginRootAction::Inner(inner) => self.handle_inner(inner, state),
            LoginRootAction::Async(request) => self.handle_async(request, state),
            LoginRootAction::Scope(LoginRootScope::SignUpDone(delegate)) => match delegate {
                SignUpDoneDelegate::DismissLoginRootView => {
                    tracing::info!("sign up finished");
                    state.path.pop_to_root();
                    Effect::none()
                }
            },
            LoginRootAction::Path(path) => self.handle_path(path, state),
            LoginRootAction::Delegate(_) => Effect::none(),
        }
    }
}

impl LoginRootCore {
    fn handle_view(&self, action: LoginRootView, state: &mut LoginRootState) -> Effect<LoginRootAction> {
        let provider = match action {
            LoginRootView::AppleLoginTapped => SocialProvider::Apple,
            LoginRootView::GoogleLoginTapped => SocialProvider::Google,
            LoginRootView::AlertDismissed => {
                state.alert = None;
                return Effect::none();
            }
        };
        if state.in_progress {
            tracing::debug!(?provider, "login already in progress");
            return Effect::none();
        }
        Effect::send(LoginRootAction::Async(LoginRootAsync::SocialLogin(provider)))
    }

    fn handle_inner(&self, action: LoginRootInner, state: &mut LoginRootState) -> Effect<LoginRootAction> {
        match action {
            LoginRootInner::LoggedIn(info) => {
                state.in_progress = false;
                if info.registered {
                    tracing::info!(provider = ?info.provider, "existing user logged in");
                    return Effect::send(LoginRootAction::Delegate(
                        LoginRootDelegate::ExistingUserLoggedIn,
                    ));
                }
                state.login = Some(info);
                state.path.pop_to_root();
                Effect::send(LoginRootAction::Path(StackAction::Push {
                    state: LoginPath::AgreeToTerms(AgreeToTermsState::default()),
                }))
            }
            LoginRootInner::LoginFailed(error) => {
                state.in_progress = false;
                if error != ClientError::Cancelled {
                    state.alert = Some(error.to_string());
                }
                Effect::none()
            }
            LoginRootInner::SignedUp(user) => {
                state.in_progress = false;
                state.login = None;
                Effect::send(LoginRootAction::Path(StackAction::Push {
                    state: LoginPath::SignUpDone(SignUpDoneState {
                        nickname: user.nickname,
                    }),
                }))
            }
            LoginRootInner::SignUpFailed(error) => {
                state.in_progress = false;
                state.alert = Some(error.to_string());
                Effect::none()
            }
        }
    }

    fn handle_async(&self, action: LoginRootAsync, state: &mut LoginRootState) -> Effect<LoginRootAction> {
        match action {
            LoginRootAsync::SocialLogin(provider) => {
                state.in_progress = true;
                Effect::task(
                    move |env| async move {
                        let info = env.auth.social_login(provider).await;
                        info.map(|info| LoginRootAction::Inner(LoginRootInner::LoggedIn(info)))
                    },
                    |error| LoginRootAction::Inner(LoginRootInner::LoginFailed(error)),
                )
                .cancellable(SOCIAL_LOGIN)
            }
            LoginRootAsync::SignUp => {
                let Some(login) = state.login.as_ref() else {
                    tracing::warn!("sign up requested without a social login");
                    return Effect::none();
                };
                state.in_progress = true;
                let request = SignUpRequest {
                    provider: login.provider,
                    nickname: state.nickname.clone(),
                    interests: state.interests.clone(),
                };
                Effect::task(
                    move |env| async move {
                        let user = env.auth.sign_up(request).await;
                        user.map(|user| LoginRootAction::Inner(LoginRootInner::SignedUp(user)))
                    },
                    |error| LoginRootAction::Inner(LoginRootInner::SignUpFailed(error)),
                )
                .cancellable(SIGN_UP)
            }
        }
    }

    /// Routes delegate outcomes of pushed screens.
    fn handle_path(
        &self,
        action: StackAction<LoginPath, LoginPathAction>,
        state: &mut LoginRootState,
    ) -> Effect<LoginRootAction> {
        let StackAction::Element { action, .. } = action else {
            return Effect::none();
        };
        match action {
            LoginPathAction::AgreeToTerms(AgreeToTermsAction::Delegate(delegate)) => match delegate {
                AgreeToTermsDelegate::PushRegisterNicknameView => {
                    Effect::send(LoginRootAction::Path(StackAction::Push {
                        state: LoginPath::RegisterNickname(Default::default()),
                    }))
                }
            },
            LoginPathAction::RegisterNickname(RegisterNicknameAction::Delegate(delegate)) => {
                match delegate {
                    RegisterNicknameDelegate::PushSelectFieldView { nickname } => {
                        state.nickname = nickname;
                        Effect::send(LoginRootAction::Path(StackAction::Push {
                            state: LoginPath::SelectField(SelectFieldState::default()),
                        }))
                    }
                }
            }
            LoginPathAction::SelectField(SelectFieldAction::Delegate(delegate)) => match delegate {
                SelectFieldDelegate::PushSignUpDoneView { interests } => {
                    state.interests = interests;
                    Effect::send(LoginRootAction::Async(LoginRootAsync::SignUp))
                }
            },
            LoginPathAction::SignUpDone(SignUpDoneAction::Delegate(delegate)) => {
                Effect::send(LoginRootAction::Scope(LoginRootScope::SignUpDone(delegate)))
            }
            _ => Effect::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SocialLoginInfo, User};

    fn reducer() -> LoginRootReducer {
        LoginRootReducer::new(&TimingConfig::default())
    }

    fn info(registered: bool) -> SocialLoginInfo {
        SocialLoginInfo {
            provider: SocialProvider::Google,
            id_token: "token".to_string(),
            auth_code: None,
            registered,
        }
    }

    #[test]
    fn new_account_pushes_terms() {
        let (state, effect) = reducer().run(
            LoginRootState::default(),
            LoginRootAction::Inner(LoginRootInner::LoggedIn(info(false))),
        );
        assert!(state.login.is_some());
        assert_eq!(
            effect.actions(),
            vec![&LoginRootAction::Path(StackAction::Push {
                state: LoginPath::AgreeToTerms(AgreeToTermsState::default())
            })]
        );
    }

    #[test]
    fn registered_account_is_delegated() {
        let (_, effect) = reducer().run(
            LoginRootState::default(),
            LoginRootAction::Inner(LoginRootInner::LoggedIn(info(true))),
        );
        assert_eq!(
            effect.actions(),
            vec![&LoginRootAction::Delegate(LoginRootDelegate::ExistingUserLoggedIn)]
        );
    }

    #[test]
    fn cancelled_login_shows_no_alert() {
        let state = LoginRootState {
            in_progress: true,
            ..LoginRootState::default()
        };
        let (state, _) = reducer().run(
            state,
            LoginRootAction::Inner(LoginRootInner::LoginFailed(ClientError::Cancelled)),
        );
        assert!(!state.in_progress);
        assert_eq!(state.alert, None);
    }

    #[test]
    fn selected_interests_start_sign_up() {
        let mut state = LoginRootState {
            login: Some(info(false)),
            ..LoginRootState::default()
        };
        let id = state
            .path
            .push(LoginPath::SelectField(SelectFieldState::default()));
        let (state, effect) = reducer().run(
            state,
            LoginRootAction::Path(StackAction::Element {
                id,
                action: LoginPathAction::SelectField(SelectFieldAction::Delegate(
                    SelectFieldDelegate::PushSignUpDoneView {
                        interests: vec!["IT".to_string()],
                    },
                )),
            }),
        );
        assert_eq!(state.interests, vec!["IT"]);
        assert_eq!(
            effect.actions(),
            vec![&LoginRootAction::Async(LoginRootAsync::SignUp)]
        );
    }

    #[test]
    fn signed_up_pushes_done_screen() {
        let (_, effect) = reducer().run(
            LoginRootState::default(),
            LoginRootAction::Inner(LoginRootInner::SignedUp(User {
                id: 7,
                email: "a@b.c".to_string(),
                nickname: "pokit".to_string(),
            })),
        );
        assert_eq!(
            effect.actions(),
            vec![&LoginRootAction::Path(StackAction::Push {
                state: LoginPath::SignUpDone(SignUpDoneState {
                    nickname: "pokit".to_string()
                })
            })]
        );
    }

    #[test]
    fn sign_up_without_login_is_ignored() {
        let (state, effect) = reducer().run(
            LoginRootState::default(),
            LoginRootAction::Async(LoginRootAsync::SignUp),
        );
        assert!(!state.in_progress);
        assert!(effect.is_none());
    }
}
