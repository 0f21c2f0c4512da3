//! Signed-in shell hosting every feature after login.
//!
//! Children never navigate on their own: they emit delegate actions and the
//! main tab decides what to push, present or refresh.

mod action;
mod path;
mod reducer;
mod state;

pub use action::{MainTabAction, MainTabDelegate, MainTabInner, MainTabView};
pub use path::{MainTabPath, MainTabPathAction, MainTabPathReducer};
pub use reducer::MainTabReducer;
pub use state::{MainTabState, Tab};
