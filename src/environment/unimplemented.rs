use async_trait::async_trait;

use crate::domain::{
    Category, ContentDetail, ContentDraft, ContentItem, ContentPage, LinkMetadata, Pageable,
    SignUpRequest, SocialLoginInfo, SocialProvider, User,
};

use super::clients::{
    AuthClient, CategoryClient, ContentClient, LinkPresentation, RemindClient, SystemSettings,
    UserClient,
};
use super::error::ClientError;

/// Collaborator that refuses every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unimplemented;

fn refuse<T>(capability: &'static str) -> Result<T, ClientError> {
    tracing::warn!(capability, "unimplemented collaborator called");
    Err(ClientError::Unimplemented { capability })
}

#[async_trait]
impl AuthClient for Unimplemented {
    async fn social_login(&self, _provider: SocialProvider) -> Result<SocialLoginInfo, ClientError> {
        refuse("auth.social_login")
    }

    async fn auto_login(&self) -> Result<bool, ClientError> {
        refuse("auth.auto_login")
    }

    async fn sign_up(&self, _request: SignUpRequest) -> Result<User, ClientError> {
        refuse("auth.sign_up")
    }

    async fn logout(&self) -> Result<(), ClientError> {
        refuse("auth.logout")
    }

    async fn withdraw(&self) -> Result<(), ClientError> {
        refuse("auth.withdraw")
    }
}

#[async_trait]
impl UserClient for Unimplemented {
    async fn fetch_user(&self) -> Result<User, ClientError> {
        refuse("user.fetch_user")
    }

    async fn is_nickname_duplicated(&self, _nickname: &str) -> Result<bool, ClientError> {
        refuse("user.is_nickname_duplicated")
    }

    async fn update_nickname(&self, _nickname: &str) -> Result<User, ClientError> {
        refuse("user.update_nickname")
    }
}

#[async_trait]
impl CategoryClient for Unimplemented {
    async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        refuse("category.categories")
    }

    async fn category_contents(
        &self,
        _category_id: u64,
        _page: Pageable,
    ) -> Result<ContentPage, ClientError> {
        refuse("category.category_contents")
    }

    async fn delete_category(&self, _category_id: u64) -> Result<(), ClientError> {
        refuse("category.delete_category")
    }
}

#[async_trait]
impl ContentClient for Unimplemented {
    async fn content_detail(&self, _content_id: u64) -> Result<ContentDetail, ClientError> {
        refuse("content.content_detail")
    }

    async fn delete_content(&self, _content_id: u64) -> Result<(), ClientError> {
        refuse("content.delete_content")
    }

    async fn set_favorite(&self, _content_id: u64, _favorite: bool) -> Result<bool, ClientError> {
        refuse("content.set_favorite")
    }

    async fn save_content(&self, _draft: ContentDraft) -> Result<ContentItem, ClientError> {
        refuse("content.save_content")
    }
}

#[async_trait]
impl RemindClient for Unimplemented {
    async fn today(&self) -> Result<Vec<ContentItem>, ClientError> {
        refuse("remind.today")
    }

    async fn unread(&self, _page: Pageable) -> Result<ContentPage, ClientError> {
        refuse("remind.unread")
    }

    async fn favorites(&self, _page: Pageable) -> Result<ContentPage, ClientError> {
        refuse("remind.favorites")
    }
}

#[async_trait]
impl LinkPresentation for Unimplemented {
    async fn metadata(&self, _url: &str) -> LinkMetadata {
        tracing::warn!(capability = "link_presentation.metadata", "unimplemented collaborator called");
        LinkMetadata::default()
    }
}

#[async_trait]
impl SystemSettings for Unimplemented {
    async fn open_settings(&self) {
        tracing::warn!(capability = "settings.open_settings", "unimplemented collaborator called");
    }
}
