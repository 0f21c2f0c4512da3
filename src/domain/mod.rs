//! Domain values exchanged with the backend collaborators.

mod content;
mod link;
mod nickname;
mod user;

pub use content::{
    Category, ContentDetail, ContentDraft, ContentItem, ContentListKind, ContentPage, Pageable,
};
pub use link::{is_web_url, LinkMetadata};
pub use nickname::{validate_nickname, NicknameError, MAX_NICKNAME_LENGTH};
pub use user::{SignUpRequest, SocialLoginInfo, SocialProvider, User, INTERESTS, MAX_INTERESTS};
