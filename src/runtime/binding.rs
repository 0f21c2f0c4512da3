//! Two-way bound form fields.
//!
//! A bound field is edited in two steps: [`BindingReducer`] writes the new
//! value into state, then the feature reducer sees the same action and
//! reacts to the field that changed.

use std::fmt::Debug;

use super::action::Action;
use super::effect::Effect;
use super::reducer::Reducer;

/// A single field edit carrying its new value.
pub trait Binding: Clone + Debug + Send + Sync + 'static {
    type State;

    /// Token naming the edited field, without its value.
    type Field: Copy + Eq + Debug;

    fn field(&self) -> Self::Field;

    /// Write the new value into `state`.
    fn apply(&self, state: &mut Self::State);
}

/// Action type with a binding variant.
pub trait BindableAction: Action {
    type Binding: Binding;

    fn binding(&self) -> Option<&Self::Binding>;
}

/// Applies binding mutations before the wrapped feature reducer runs.
pub struct BindingReducer<R> {
    inner: R,
}

impl<R> BindingReducer<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R> Reducer for BindingReducer<R>
where
    R: Reducer,
    R::Action: BindableAction,
    <R::Action as BindableAction>::Binding: Binding<State = R::State>,
{
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: &mut R::State, action: R::Action) -> Effect<R::Action> {
        if let Some(binding) = action.binding() {
            tracing::trace!(field = ?binding.field(), "applying binding");
            binding.apply(state);
        }
        self.inner.reduce(state, action)
    }
}
