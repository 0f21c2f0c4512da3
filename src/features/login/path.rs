//! Screens pushed onto the login navigation stack.

use crate::config::TimingConfig;
use crate::runtime::{Action, BindingReducer, Category, Effect, Reducer, Segment, State};

use super::agree_to_terms::{AgreeToTermsAction, AgreeToTermsReducer, AgreeToTermsState};
use super::register_nickname::{
    RegisterNicknameAction, RegisterNicknameReducer, RegisterNicknameState,
};
use super::select_field::{SelectFieldAction, SelectFieldReducer, SelectFieldState};
use super::sign_up_done::{SignUpDoneAction, SignUpDoneReducer, SignUpDoneState};

#[derive(Debug, Clone, PartialEq)]
pub enum LoginPath {
    AgreeToTerms(AgreeToTermsState),
    RegisterNickname(RegisterNicknameState),
    SelectField(SelectFieldState),
    SignUpDone(SignUpDoneState),
}

impl State for LoginPath {}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginPathAction {
    AgreeToTerms(AgreeToTermsAction),
    RegisterNickname(RegisterNicknameAction),
    SelectField(SelectFieldAction),
    SignUpDone(SignUpDoneAction),
}

impl Action for LoginPathAction {
    fn category(&self) -> Category {
        Category::Child
    }
}

/// Dispatches to the reducer of whichever screen the element holds.
pub struct LoginPathReducer {
    agree_to_terms: BindingReducer<AgreeToTermsReducer>,
    register_nickname: BindingReducer<RegisterNicknameReducer>,
    select_field: SelectFieldReducer,
    sign_up_done: SignUpDoneReducer,
}

impl LoginPathReducer {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            agree_to_terms: AgreeToTermsReducer.with_bindings(),
            register_nickname: RegisterNicknameReducer::new(timing).with_bindings(),
            select_field: SelectFieldReducer,
            sign_up_done: SignUpDoneReducer,
        }
    }
}

impl Reducer for LoginPathReducer {
    type State = LoginPath;
    type Action = LoginPathAction;

    fn reduce(&self, state: &mut LoginPath, action: LoginPathAction) -> Effect<LoginPathAction> {
        match (state, action) {
            (LoginPath::AgreeToTerms(state), LoginPathAction::AgreeToTerms(action)) => self
                .agree_to_terms
                .reduce(state, action)
                .scoped(Segment::Case("agree_to_terms"), LoginPathAction::AgreeToTerms),
            (LoginPath::RegisterNickname(state), LoginPathAction::RegisterNickname(action)) => {
                self.register_nickname
                    .reduce(state, action)
                    .scoped(
                        Segment::Case("register_nickname"),
                        LoginPathAction::RegisterNickname,
                    )
            }
            (LoginPath::SelectField(state), LoginPathAction::SelectField(action)) => self
                .select_field
                .reduce(state, action)
                .scoped(Segment::Case("select_field"), LoginPathAction::SelectField),
            (LoginPath::SignUpDone(state), LoginPathAction::SignUpDone(action)) => self
                .sign_up_done
                .reduce(state, action)
                .scoped(Segment::Case("sign_up_done"), LoginPathAction::SignUpDone),
            (_, action) => {
                tracing::trace!(?action, "action does not match screen");
                Effect::none()
            }
        }
    }
}
