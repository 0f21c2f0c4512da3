//! Final sign up screen.

use crate::runtime::{Action, Category, Effect, Reducer, State};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignUpDoneState {
    pub nickname: String,
}

impl State for SignUpDoneState {}

#[derive(Debug, Clone, PartialEq)]
pub enum SignUpDoneAction {
    View(SignUpDoneView),
    Delegate(SignUpDoneDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignUpDoneView {
    StartTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignUpDoneDelegate {
    DismissLoginRootView,
}

impl Action for SignUpDoneAction {
    fn category(&self) -> Category {
        match self {
            SignUpDoneAction::View(_) => Category::View,
            SignUpDoneAction::Delegate(_) => Category::Delegate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SignUpDoneReducer;

impl Reducer for SignUpDoneReducer {
    type State = SignUpDoneState;
    type Action = SignUpDoneAction;

    fn reduce(
        &self,
        _state: &mut SignUpDoneState,
        action: SignUpDoneAction,
    ) -> Effect<SignUpDoneAction> {
        match action {
            SignUpDoneAction::View(SignUpDoneView::StartTapped) => Effect::send(
                SignUpDoneAction::Delegate(SignUpDoneDelegate::DismissLoginRootView),
            ),
            SignUpDoneAction::Delegate(_) => Effect::none(),
        }
    }
}
