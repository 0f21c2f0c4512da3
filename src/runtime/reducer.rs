//! Reducer trait and composition entry points.

use super::action::Action;
use super::binding::{BindableAction, Binding, BindingReducer};
use super::effect::Effect;
use super::identified::Identity;
use super::navigation::{ForEachStack, Stack};
use super::scope::{Case, Each, Field, FieldScope, ForEach, IfCaseLet, IfLet, Presented};
use super::state::State;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen. It must
/// not perform I/O: anything asynchronous is described by the returned
/// [`Effect`] and started by the store once the reduce has finished.
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer operates on.
    type State: State;

    /// The action type this reducer handles.
    type Action: Action;

    /// Apply `action` to `state` and describe the follow-up work.
    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action>;

    /// By-value form of [`Reducer::reduce`].
    fn run(
        &self,
        mut state: Self::State,
        action: Self::Action,
    ) -> (Self::State, Effect<Self::Action>) {
        let effect = self.reduce(&mut state, action);
        (state, effect)
    }

    /// Embed `child` on a field of this reducer's state.
    fn scope<C>(
        self,
        field: Field<Self::State, Self::Action, C::State, C::Action>,
        child: C,
    ) -> FieldScope<Self, C>
    where
        Self: Sized,
        C: Reducer,
    {
        FieldScope::new(self, field, child)
    }

    /// Embed `child` on one variant of this reducer's state.
    fn if_case_let<C>(
        self,
        case: Case<Self::State, Self::Action, C::State, C::Action>,
        child: C,
    ) -> IfCaseLet<Self, C>
    where
        Self: Sized,
        C: Reducer,
    {
        IfCaseLet::new(self, case, child)
    }

    /// Embed `child` on an optional, presented piece of state.
    fn if_let<C>(
        self,
        presented: Presented<Self::State, Self::Action, C::State, C::Action>,
        child: C,
    ) -> IfLet<Self, C>
    where
        Self: Sized,
        C: Reducer,
    {
        IfLet::new(self, presented, child)
    }

    /// Run `child` on each element of an identified collection.
    fn for_each<C, K>(
        self,
        each: Each<Self::State, Self::Action, K, C::State, C::Action>,
        child: C,
    ) -> ForEach<Self, C, K>
    where
        Self: Sized,
        C: Reducer,
        K: Identity,
    {
        ForEach::new(self, each, child)
    }

    /// Run `child` on each element of a navigation stack.
    fn for_each_stack<C>(
        self,
        stack: Stack<Self::State, Self::Action, C::State, C::Action>,
        child: C,
    ) -> ForEachStack<Self, C>
    where
        Self: Sized,
        C: Reducer,
    {
        ForEachStack::new(self, stack, child)
    }

    /// Apply binding mutations before this reducer reacts to them.
    fn with_bindings(self) -> BindingReducer<Self>
    where
        Self: Sized,
        Self::Action: BindableAction,
        <Self::Action as BindableAction>::Binding: Binding<State = Self::State>,
    {
        BindingReducer::new(self)
    }
}
