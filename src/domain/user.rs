#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub nickname: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    Apple,
    Google,
}

/// Credentials returned by a completed social login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLoginInfo {
    pub provider: SocialProvider,
    pub id_token: String,
    pub auth_code: Option<String>,
    /// Whether the account already finished sign up.
    pub registered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub provider: SocialProvider,
    pub nickname: String,
    pub interests: Vec<String>,
}

pub const MAX_INTERESTS: usize = 3;

pub const INTERESTS: &[&str] = &[
    "Sports",
    "Culture",
    "Economy",
    "Travel",
    "Cooking",
    "Study",
    "IT",
    "Parenting",
    "Pets",
    "Health",
    "Humor",
    "Fashion",
];
