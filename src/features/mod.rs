//! Feature tree of the application.
//!
//! Each feature is a state, an action enum split by category, and a
//! reducer. Composite features build their reducer from a private core
//! plus the runtime's scoping combinators.

pub mod category_detail;
pub mod content_detail;
pub mod content_list;
pub mod content_setting;
pub mod form;
pub mod intro;
pub mod login;
pub mod main_tab;
pub mod nickname_setting;
pub mod pokit_root;
pub mod remind;
pub mod root;
pub mod setting;
pub mod sheet;
pub mod splash;

pub use root::{RootAction, RootReducer, RootState};
