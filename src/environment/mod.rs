//! External collaborators threaded into every effect.
//!
//! Reducers never call these directly: an effect receives the store's
//! [`Environment`] when it starts and talks to the clients from there.

mod clients;
mod error;
mod preview;
mod unimplemented;

use std::sync::Arc;

pub use clients::{
    AuthClient, CategoryClient, ContentClient, LinkPresentation, RemindClient, SystemSettings,
    UserClient,
};
pub use error::ClientError;
pub use preview::PreviewClient;
pub use unimplemented::Unimplemented;

/// Set of collaborators available to effects.
#[derive(Clone)]
pub struct Environment {
    pub auth: Arc<dyn AuthClient>,
    pub user: Arc<dyn UserClient>,
    pub category: Arc<dyn CategoryClient>,
    pub content: Arc<dyn ContentClient>,
    pub remind: Arc<dyn RemindClient>,
    pub link_presentation: Arc<dyn LinkPresentation>,
    pub settings: Arc<dyn SystemSettings>,
}

impl Environment {
    /// In-memory collaborators backed by sample data.
    pub fn preview(signed_in: bool) -> Self {
        let client = Arc::new(PreviewClient::new(signed_in));
        Self {
            auth: client.clone(),
            user: client.clone(),
            category: client.clone(),
            content: client.clone(),
            remind: client.clone(),
            link_presentation: client.clone(),
            settings: client,
        }
    }

    /// Every call fails with [`ClientError::Unimplemented`].
    ///
    /// Tests start from this and replace the collaborators they exercise.
    pub fn unimplemented() -> Self {
        let client = Arc::new(Unimplemented);
        Self {
            auth: client.clone(),
            user: client.clone(),
            category: client.clone(),
            content: client.clone(),
            remind: client.clone(),
            link_presentation: client.clone(),
            settings: client,
        }
    }

    pub fn with_auth(mut self, auth: Arc<dyn AuthClient>) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_user(mut self, user: Arc<dyn UserClient>) -> Self {
        self.user = user;
        self
    }

    pub fn with_category(mut self, category: Arc<dyn CategoryClient>) -> Self {
        self.category = category;
        self
    }

    pub fn with_content(mut self, content: Arc<dyn ContentClient>) -> Self {
        self.content = content;
        self
    }

    pub fn with_remind(mut self, remind: Arc<dyn RemindClient>) -> Self {
        self.remind = remind;
        self
    }

    pub fn with_link_presentation(mut self, link_presentation: Arc<dyn LinkPresentation>) -> Self {
        self.link_presentation = link_presentation;
        self
    }

    pub fn with_settings(mut self, settings: Arc<dyn SystemSettings>) -> Self {
        self.settings = settings;
        self
    }
}
