//! Social login and the sign up flow.
//!
//! The login screen owns a navigation stack: terms, nickname, interests,
//! then a completion screen. Each pushed screen reports its outcome as a
//! delegate action, and the root decides what to push next.

pub mod agree_to_terms;
mod action;
mod path;
pub mod register_nickname;
mod reducer;
pub mod select_field;
pub mod sign_up_done;
mod state;

pub use action::{
    LoginRootAction, LoginRootAsync, LoginRootDelegate, LoginRootInner, LoginRootScope,
    LoginRootView,
};
pub use path::{LoginPath, LoginPathAction, LoginPathReducer};
pub use reducer::LoginRootReducer;
pub use state::LoginRootState;
