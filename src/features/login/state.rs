use crate::domain::SocialLoginInfo;
use crate::runtime::{StackState, State};

use super::path::LoginPath;

/// Login screen plus the sign up flow pushed on top of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginRootState {
    pub path: StackState<LoginPath>,
    /// Social login awaiting sign up.
    pub login: Option<SocialLoginInfo>,
    pub nickname: String,
    pub interests: Vec<String>,
    pub in_progress: bool,
    pub alert: Option<String>,
}

impl State for LoginRootState {}
