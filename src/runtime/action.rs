//! Base trait for actions dispatched through the runtime.

use std::fmt::Debug;

/// Category an action belongs to inside its feature.
///
/// Every feature partitions its actions the same way so that the origin of
/// an action is visible from its tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Originates from user interaction.
    View,
    /// Internal bookkeeping, usually fed back from effects.
    Inner,
    /// Request to start an effect.
    Async,
    /// Routes a child's delegate outcome into local handling.
    Scope,
    /// Emitted outward for an ancestor to consume.
    Delegate,
    /// Addressed to a child scope.
    Child,
}

/// Trait for action objects.
///
/// Actions represent:
/// - User actions (button taps, field edits)
/// - Effect results (API responses, timers)
/// - Navigation events raised by child features
///
/// Actions are processed by reducers to produce new states and effects.
pub trait Action: Clone + Debug + Send + Sync + 'static {
    /// Category of this action, recorded on every dispatch span.
    fn category(&self) -> Category;
}
