use crate::domain::{SocialLoginInfo, SocialProvider, User};
use crate::environment::ClientError;
use crate::runtime::{Action, Category, StackAction};

use super::path::{LoginPath, LoginPathAction};
use super::sign_up_done::SignUpDoneDelegate;

#[derive(Debug, Clone, PartialEq)]
pub enum LoginRootAction {
    View(LoginRootView),
    Inner(LoginRootInner),
    Async(LoginRootAsync),
    Scope(LoginRootScope),
    Delegate(LoginRootDelegate),
    Path(StackAction<LoginPath, LoginPathAction>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginRootView {
    AppleLoginTapped,
    GoogleLoginTapped,
    AlertDismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginRootInner {
    LoggedIn(SocialLoginInfo),
    LoginFailed(ClientError),
    SignedUp(User),
    SignUpFailed(ClientError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginRootAsync {
    SocialLogin(SocialProvider),
    SignUp,
}

/// Outcomes of pushed screens, observed by the presenter of the login flow.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginRootScope {
    SignUpDone(SignUpDoneDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginRootDelegate {
    /// Social login matched an account that already finished sign up.
    ExistingUserLoggedIn,
}

impl Action for LoginRootAction {
    fn category(&self) -> Category {
        match self {
            LoginRootAction::View(_) => Category::View,
            LoginRootAction::Inner(_) => Category::Inner,
            LoginRootAction::Async(_) => Category::Async,
            LoginRootAction::Scope(_) => Category::Scope,
            LoginRootAction::Delegate(_) => Category::Delegate,
            LoginRootAction::Path(_) => Category::Child,
        }
    }
}
