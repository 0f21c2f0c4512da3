//! Base trait for feature state.

use std::fmt::Debug;

/// Marker trait for feature state objects.
///
/// States should be:
/// - Cloneable (observers receive snapshots)
/// - Self-contained (all data needed to render the screen)
/// - Comparable (PartialEq for detecting changes)
pub trait State: Clone + Debug + PartialEq + Send + Sync + 'static {}
