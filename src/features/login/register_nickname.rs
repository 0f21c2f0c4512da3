//! Nickname entry during sign up.

use std::time::Duration;

use crate::config::TimingConfig;
use crate::environment::ClientError;
use crate::features::form::NicknameForm;
use crate::runtime::{Action, BindableAction, Binding, Category, Effect, EffectKey, Reducer, State};

const TEXT_CHANGED: EffectKey = EffectKey::new("register_nickname.text_changed");
const DUPLICATE_CHECK: EffectKey = EffectKey::new("register_nickname.duplicate_check");

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterNicknameState {
    pub form: NicknameForm,
}

impl State for RegisterNicknameState {}

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterNicknameBinding {
    Nickname(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterNicknameField {
    Nickname,
}

impl Binding for RegisterNicknameBinding {
    type State = RegisterNicknameState;
    type Field = RegisterNicknameField;

    fn field(&self) -> RegisterNicknameField {
        match self {
            RegisterNicknameBinding::Nickname(_) => RegisterNicknameField::Nickname,
        }
    }

    fn apply(&self, state: &mut RegisterNicknameState) {
        match self {
            RegisterNicknameBinding::Nickname(text) => state.form.text = text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterNicknameAction {
    View(RegisterNicknameView),
    Inner(RegisterNicknameInner),
    Async(RegisterNicknameAsync),
    Delegate(RegisterNicknameDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterNicknameView {
    Binding(RegisterNicknameBinding),
    NextTapped,
    BackTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterNicknameInner {
    TextChanged,
    DuplicateChecked { nickname: String, duplicated: bool },
    DuplicateCheckFailed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterNicknameAsync {
    CheckDuplicate(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterNicknameDelegate {
    PushSelectFieldView { nickname: String },
}

impl Action for RegisterNicknameAction {
    fn category(&self) -> Category {
        match self {
            RegisterNicknameAction::View(_) => Category::View,
            RegisterNicknameAction::Inner(_) => Category::Inner,
            RegisterNicknameAction::Async(_) => Category::Async,
            RegisterNicknameAction::Delegate(_) => Category::Delegate,
        }
    }
}

impl BindableAction for RegisterNicknameAction {
    type Binding = RegisterNicknameBinding;

    fn binding(&self) -> Option<&RegisterNicknameBinding> {
        match self {
            RegisterNicknameAction::View(RegisterNicknameView::Binding(binding)) => Some(binding),
            _ => None,
        }
    }
}

/// Feature logic; compose with `.with_bindings()`.
#[derive(Debug, Clone)]
pub struct RegisterNicknameReducer {
    debounce: Duration,
}

impl RegisterNicknameReducer {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            debounce: timing.nickname_debounce(),
        }
    }
}

impl Reducer for RegisterNicknameReducer {
    type State = RegisterNicknameState;
    type Action = RegisterNicknameAction;

    fn reduce(
        &self,
        state: &mut RegisterNicknameState,
        action: RegisterNicknameAction,
    ) -> Effect<RegisterNicknameAction> {
        match action {
            RegisterNicknameAction::View(view) => match view {
                RegisterNicknameView::Binding(binding) => match binding.field() {
                    RegisterNicknameField::Nickname => {
                        state.form.edited();
                        Effect::send(RegisterNicknameAction::Inner(
                            RegisterNicknameInner::TextChanged,
                        ))
                        .debounce(TEXT_CHANGED, self.debounce)
                    }
                },
                RegisterNicknameView::NextTapped => {
                    if !state.form.button.is_enabled() {
                        return Effect::none();
                    }
                    Effect::send(RegisterNicknameAction::Delegate(
                        RegisterNicknameDelegate::PushSelectFieldView {
                            nickname: state.form.text.clone(),
                        },
                    ))
                }
                RegisterNicknameView::BackTapped => Effect::dismiss(),
            },
            RegisterNicknameAction::Inner(inner) => match inner {
                RegisterNicknameInner::TextChanged => match state.form.validate() {
                    Some(nickname) => Effect::send(RegisterNicknameAction::Async(
                        RegisterNicknameAsync::CheckDuplicate(nickname),
                    )),
                    None => Effect::cancel(DUPLICATE_CHECK),
                },
                RegisterNicknameInner::DuplicateChecked {
                    nickname,
                    duplicated,
                } => {
                    state.form.checked(&nickname, duplicated);
                    Effect::none()
                }
                RegisterNicknameInner::DuplicateCheckFailed(error) => {
                    state.form.check_failed(&error);
                    Effect::none()
                }
            },
            RegisterNicknameAction::Async(RegisterNicknameAsync::CheckDuplicate(nickname)) => {
                Effect::task(
                    move |env| async move {
                        let duplicated = env.user.is_nickname_duplicated(&nickname).await;
                        duplicated.map(|duplicated| {
                            RegisterNicknameAction::Inner(RegisterNicknameInner::DuplicateChecked {
                                nickname,
                                duplicated,
                            })
                        })
                    },
                    |error| {
                        RegisterNicknameAction::Inner(RegisterNicknameInner::DuplicateCheckFailed(
                            error,
                        ))
                    },
                )
                .cancellable(DUPLICATE_CHECK)
            }
            RegisterNicknameAction::Delegate(_) => Effect::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::form::ButtonState;

    fn reducer() -> crate::runtime::BindingReducer<RegisterNicknameReducer> {
        RegisterNicknameReducer::new(&TimingConfig::default()).with_bindings()
    }

    #[test]
    fn typing_disables_button_and_debounces_validation() {
        let state = RegisterNicknameState {
            form: NicknameForm {
                button: ButtonState::Enabled,
                ..NicknameForm::with_text("pokit")
            },
        };
        let (state, effect) = reducer().run(
            state,
            RegisterNicknameAction::View(RegisterNicknameView::Binding(
                RegisterNicknameBinding::Nickname("pokit2".to_string()),
            )),
        );
        assert_eq!(state.form.text, "pokit2");
        assert_eq!(state.form.button, ButtonState::Disabled);
        assert!(effect.actions().is_empty());
        assert!(effect.is_keyed(&TEXT_CHANGED));
    }

    #[test]
    fn valid_text_requests_duplicate_check() {
        let (_, effect) = reducer().run(
            RegisterNicknameState {
                form: NicknameForm::with_text("pokit"),
            },
            RegisterNicknameAction::Inner(RegisterNicknameInner::TextChanged),
        );
        assert_eq!(
            effect.actions(),
            vec![&RegisterNicknameAction::Async(
                RegisterNicknameAsync::CheckDuplicate("pokit".to_string())
            )]
        );
    }

    #[test]
    fn invalid_text_cancels_pending_check() {
        let (state, effect) = reducer().run(
            RegisterNicknameState {
                form: NicknameForm::with_text("pokit pokit!"),
            },
            RegisterNicknameAction::Inner(RegisterNicknameInner::TextChanged),
        );
        assert!(state.form.input.error().is_some());
        assert!(effect.actions().is_empty());
        assert_eq!(effect.operations(), 0);
    }

    #[test]
    fn next_passes_nickname_up_once_enabled() {
        let mut form = NicknameForm::with_text("pokit");
        form.button = ButtonState::Enabled;
        let (_, effect) = reducer().run(
            RegisterNicknameState { form },
            RegisterNicknameAction::View(RegisterNicknameView::NextTapped),
        );
        assert_eq!(
            effect.actions(),
            vec![&RegisterNicknameAction::Delegate(
                RegisterNicknameDelegate::PushSelectFieldView {
                    nickname: "pokit".to_string()
                }
            )]
        );
    }
}
