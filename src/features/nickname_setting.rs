//! Change the nickname of the signed in user.

use std::time::Duration;

use crate::config::TimingConfig;
use crate::domain::User;
use crate::environment::ClientError;
use crate::features::form::{ButtonState, NicknameForm};
use crate::runtime::{Action, BindableAction, Binding, Category, Effect, EffectKey, Reducer, State};

const TEXT_CHANGED: EffectKey = EffectKey::new("nickname_setting.text_changed");
const DUPLICATE_CHECK: EffectKey = EffectKey::new("nickname_setting.duplicate_check");
const UPDATE: EffectKey = EffectKey::new("nickname_setting.update");

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NicknameSettingState {
    pub form: NicknameForm,
    pub user: Option<User>,
    pub saving: bool,
    pub alert: Option<String>,
}

impl State for NicknameSettingState {}

#[derive(Debug, Clone, PartialEq)]
pub enum NicknameSettingBinding {
    Nickname(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NicknameSettingField {
    Nickname,
}

impl Binding for NicknameSettingBinding {
    type State = NicknameSettingState;
    type Field = NicknameSettingField;

    fn field(&self) -> NicknameSettingField {
        match self {
            NicknameSettingBinding::Nickname(_) => NicknameSettingField::Nickname,
        }
    }

    fn apply(&self, state: &mut NicknameSettingState) {
        match self {
            NicknameSettingBinding::Nickname(text) => state.form.text = text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NicknameSettingAction {
    View(NicknameSettingView),
    Inner(NicknameSettingInner),
    Async(NicknameSettingAsync),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NicknameSettingView {
    Binding(NicknameSettingBinding),
    OnAppear,
    SaveTapped,
    AlertDismissed,
    BackTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NicknameSettingInner {
    UserLoaded(User),
    TextChanged,
    DuplicateChecked { nickname: String, duplicated: bool },
    DuplicateCheckFailed(ClientError),
    Failed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NicknameSettingAsync {
    FetchUser,
    CheckDuplicate(String),
    UpdateNickname,
}

impl Action for NicknameSettingAction {
    fn category(&self) -> Category {
        match self {
            NicknameSettingAction::View(_) => Category::View,
            NicknameSettingAction::Inner(_) => Category::Inner,
            NicknameSettingAction::Async(_) => Category::Async,
        }
    }
}

impl BindableAction for NicknameSettingAction {
    type Binding = NicknameSettingBinding;

    fn binding(&self) -> Option<&NicknameSettingBinding> {
        match self {
            NicknameSettingAction::View(NicknameSettingView::Binding(binding)) => Some(binding),
            _ => None,
        }
    }
}

/// Feature logic; compose with `.with_bindings()`.
///
/// A successful update dismisses the screen from inside the effect, so the
/// presenting stack pops it without a delegate round trip.
#[derive(Debug, Clone)]
pub struct NicknameSettingReducer {
    debounce: Duration,
}

impl NicknameSettingReducer {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            debounce: timing.nickname_debounce(),
        }
    }
}

impl Reducer for NicknameSettingReducer {
    type State = NicknameSettingState;
    type Action = NicknameSettingAction;

    fn reduce(
        &self,
        state: &mut NicknameSettingState,
        action: NicknameSettingAction,
    ) -> Effect<NicknameSettingAction> {
        match action {
            NicknameSettingAction::View(view) => match view {
                NicknameSettingView::Binding(binding) => match binding.field() {
                    NicknameSettingField::Nickname => {
                        state.form.edited();
                        Effect::send(NicknameSettingAction::Inner(
                            NicknameSettingInner::TextChanged,
                        ))
                        .debounce(TEXT_CHANGED, self.debounce)
                    }
                },
                NicknameSettingView::OnAppear => {
                    Effect::send(NicknameSettingAction::Async(NicknameSettingAsync::FetchUser))
                }
                NicknameSettingView::SaveTapped => {
                    if !state.form.button.is_enabled() || state.saving {
                        return Effect::none();
                    }
                    Effect::send(NicknameSettingAction::Async(
                        NicknameSettingAsync::UpdateNickname,
                    ))
                }
                NicknameSettingView::AlertDismissed => {
                    state.alert = None;
                    Effect::none()
                }
                NicknameSettingView::BackTapped => Effect::dismiss(),
            },
            NicknameSettingAction::Inner(inner) => {
                match inner {
                    NicknameSettingInner::UserLoaded(user) => {
                        state.form = NicknameForm::with_text(user.nickname.clone());
                        state.user = Some(user);
                    }
                    NicknameSettingInner::TextChanged => {
                        let unchanged = state
                            .user
                            .as_ref()
                            .is_some_and(|user| user.nickname == state.form.text);
                        return match state.form.validate() {
                            Some(_) if unchanged => {
                                state.form.checking = false;
                                Effect::cancel(DUPLICATE_CHECK)
                            }
                            Some(nickname) => Effect::send(NicknameSettingAction::Async(
                                NicknameSettingAsync::CheckDuplicate(nickname),
                            )),
                            None => Effect::cancel(DUPLICATE_CHECK),
                        };
                    }
                    NicknameSettingInner::DuplicateChecked {
                        nickname,
                        duplicated,
                    } => state.form.checked(&nickname, duplicated),
                    NicknameSettingInner::DuplicateCheckFailed(error) => {
                        state.form.check_failed(&error)
                    }
                    NicknameSettingInner::Failed(error) => {
                        state.saving = false;
                        state.form.button = ButtonState::Enabled;
                        state.alert = Some(error.to_string());
                    }
                }
                Effect::none()
            }
            NicknameSettingAction::Async(request) => match request {
                NicknameSettingAsync::FetchUser => Effect::task(
                    |env| async move {
                        let user = env.user.fetch_user().await;
                        user.map(|user| {
                            NicknameSettingAction::Inner(NicknameSettingInner::UserLoaded(user))
                        })
                    },
                    |error| NicknameSettingAction::Inner(NicknameSettingInner::Failed(error)),
                ),
                NicknameSettingAsync::CheckDuplicate(nickname) => Effect::task(
                    move |env| async move {
                        let duplicated = env.user.is_nickname_duplicated(&nickname).await;
                        duplicated.map(|duplicated| {
                            NicknameSettingAction::Inner(NicknameSettingInner::DuplicateChecked {
                                nickname,
                                duplicated,
                            })
                        })
                    },
                    |error| {
                        NicknameSettingAction::Inner(NicknameSettingInner::DuplicateCheckFailed(
                            error,
                        ))
                    },
                )
                .cancellable(DUPLICATE_CHECK),
                NicknameSettingAsync::UpdateNickname => {
                    state.saving = true;
                    state.form.button = ButtonState::Disabled;
                    let nickname = state.form.text.clone();
                    Effect::try_run(
                        move |env, send| async move {
                            let user = env.user.update_nickname(&nickname).await?;
                            tracing::info!(nickname = %user.nickname, "nickname updated");
                            send.dismiss();
                            Ok::<(), ClientError>(())
                        },
                        |error| NicknameSettingAction::Inner(NicknameSettingInner::Failed(error)),
                    )
                    .cancellable(UPDATE)
                }
            },
        }
    }
}
