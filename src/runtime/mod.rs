//! Composition runtime for feature state machines.
//!
//! This module provides the primitives every feature is built from and the
//! loop that drives the composed root machine.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Store ──→ Reducer ──→ State ──→ Observers
//!    ↑                    │
//!    │                 Effect
//!    │                    ↓
//!    └───────────── Scheduler
//! ```
//!
//! - **State**: value tree owned by the store, mutated only by reducers
//! - **Action**: user input, effect output or a child's delegate
//! - **Reducer**: `(state, action) → effect`, synchronous and deterministic
//! - **Effect**: deferred work started by the scheduler after a reduce
//!
//! Child reducers are lifted into their parent with the scoping combinators
//! ([`FieldScope`], [`IfCaseLet`], [`IfLet`], [`ForEach`], [`ForEachStack`]).
//! Effects started inside a scope are tagged with its [`ScopePath`] so that
//! detaching the scope cancels them.

mod action;
mod binding;
mod effect;
mod identified;
mod navigation;
mod reducer;
mod scheduler;
mod scope;
mod state;
mod store;

pub use action::{Action, Category};
pub use binding::{BindableAction, Binding, BindingReducer};
pub use effect::{Effect, EffectKey, Policy, Sender};
pub use identified::{Identifiable, IdentifiedVec, Identity};
pub use navigation::{ForEachStack, Stack, StackAction, StackElementId, StackState};
pub use reducer::Reducer;
pub use scope::{
    Case, Each, Field, FieldScope, ForEach, IfCaseLet, IfLet, Presented, PresentationAction,
    PresentationState, ScopePath, Segment,
};
pub use state::State;
pub use store::{Store, StoreHandle};
