//! Collaborator traits reachable from effects.

use async_trait::async_trait;

use crate::domain::{
    Category, ContentDetail, ContentDraft, ContentItem, ContentPage, LinkMetadata, Pageable,
    SignUpRequest, SocialLoginInfo, SocialProvider, User,
};

use super::error::ClientError;

#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn social_login(&self, provider: SocialProvider) -> Result<SocialLoginInfo, ClientError>;

    /// Refresh the stored session; `false` when there is none.
    async fn auto_login(&self) -> Result<bool, ClientError>;

    async fn sign_up(&self, request: SignUpRequest) -> Result<User, ClientError>;

    async fn logout(&self) -> Result<(), ClientError>;

    async fn withdraw(&self) -> Result<(), ClientError>;
}

#[async_trait]
pub trait UserClient: Send + Sync {
    async fn fetch_user(&self) -> Result<User, ClientError>;

    async fn is_nickname_duplicated(&self, nickname: &str) -> Result<bool, ClientError>;

    async fn update_nickname(&self, nickname: &str) -> Result<User, ClientError>;
}

#[async_trait]
pub trait CategoryClient: Send + Sync {
    async fn categories(&self) -> Result<Vec<Category>, ClientError>;

    async fn category_contents(
        &self,
        category_id: u64,
        page: Pageable,
    ) -> Result<ContentPage, ClientError>;

    async fn delete_category(&self, category_id: u64) -> Result<(), ClientError>;
}

#[async_trait]
pub trait ContentClient: Send + Sync {
    async fn content_detail(&self, content_id: u64) -> Result<ContentDetail, ClientError>;

    async fn delete_content(&self, content_id: u64) -> Result<(), ClientError>;

    /// Returns the favorite flag as stored by the backend.
    async fn set_favorite(&self, content_id: u64, favorite: bool) -> Result<bool, ClientError>;

    async fn save_content(&self, draft: ContentDraft) -> Result<ContentItem, ClientError>;
}

#[async_trait]
pub trait RemindClient: Send + Sync {
    async fn today(&self) -> Result<Vec<ContentItem>, ClientError>;

    async fn unread(&self, page: Pageable) -> Result<ContentPage, ClientError>;

    async fn favorites(&self, page: Pageable) -> Result<ContentPage, ClientError>;
}

/// Extracts preview information from a web page.
#[async_trait]
pub trait LinkPresentation: Send + Sync {
    async fn metadata(&self, url: &str) -> LinkMetadata;
}

#[async_trait]
pub trait SystemSettings: Send + Sync {
    async fn open_settings(&self);
}
