//! Interest selection during sign up.

use crate::domain::{INTERESTS, MAX_INTERESTS};
use crate::runtime::{Action, Category, Effect, Reducer, State};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectFieldState {
    pub fields: Vec<String>,
    /// Selected interests in tap order.
    pub selected: Vec<String>,
}

impl Default for SelectFieldState {
    fn default() -> Self {
        Self {
            fields: INTERESTS.iter().map(|field| field.to_string()).collect(),
            selected: Vec::new(),
        }
    }
}

impl SelectFieldState {
    pub fn can_proceed(&self) -> bool {
        !self.selected.is_empty()
    }
}

impl State for SelectFieldState {}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectFieldAction {
    View(SelectFieldView),
    Delegate(SelectFieldDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectFieldView {
    FieldTapped(String),
    NextTapped,
    BackTapped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectFieldDelegate {
    PushSignUpDoneView { interests: Vec<String> },
}

impl Action for SelectFieldAction {
    fn category(&self) -> Category {
        match self {
            SelectFieldAction::View(_) => Category::View,
            SelectFieldAction::Delegate(_) => Category::Delegate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectFieldReducer;

impl Reducer for SelectFieldReducer {
    type State = SelectFieldState;
    type Action = SelectFieldAction;

    fn reduce(
        &self,
        state: &mut SelectFieldState,
        action: SelectFieldAction,
    ) -> Effect<SelectFieldAction> {
        match action {
            SelectFieldAction::View(SelectFieldView::FieldTapped(field)) => {
                if let Some(index) = state.selected.iter().position(|f| *f == field) {
                    state.selected.remove(index);
                } else if !state.fields.contains(&field) {
                    tracing::trace!(%field, "unknown interest");
                } else if state.selected.len() < MAX_INTERESTS {
                    state.selected.push(field);
                }
                Effect::none()
            }
            SelectFieldAction::View(SelectFieldView::NextTapped) => {
                if !state.can_proceed() {
                    return Effect::none();
                }
                Effect::send(SelectFieldAction::Delegate(
                    SelectFieldDelegate::PushSignUpDoneView {
                        interests: state.selected.clone(),
                    },
                ))
            }
            SelectFieldAction::View(SelectFieldView::BackTapped) => Effect::dismiss(),
            SelectFieldAction::Delegate(_) => Effect::none(),
        }
    }
}
