//! Pokit: a link-saving app expressed as a tree of reducers.
//!
//! [`runtime`] is the composition runtime (reducers, scoping combinators,
//! effect scheduler, store, navigation stack). [`features`] is the feature
//! tree built on it, and [`environment`] holds the collaborators its effects
//! talk to.

pub mod config;
pub mod domain;
pub mod environment;
pub mod features;
pub mod logging;
pub mod runtime;
pub mod shutdown;
