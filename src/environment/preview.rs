//! Sample-data collaborators for the demo binary.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{
    Category, ContentDetail, ContentDraft, ContentItem, ContentPage, LinkMetadata, Pageable,
    SignUpRequest, SocialLoginInfo, SocialProvider, User,
};

use super::clients::{
    AuthClient, CategoryClient, ContentClient, LinkPresentation, RemindClient, SystemSettings,
    UserClient,
};
use super::error::ClientError;

const LATENCY: Duration = Duration::from_millis(40);

struct Data {
    signed_in: bool,
    user: Option<User>,
    categories: Vec<Category>,
    contents: Vec<ContentItem>,
    next_content_id: u64,
}

/// Collaborator serving every call from an in-memory data set.
pub struct PreviewClient {
    data: Mutex<Data>,
}

impl PreviewClient {
    pub fn new(signed_in: bool) -> Self {
        let categories = vec![
            category(1, "Reading list", 2),
            category(2, "Recipes", 1),
        ];
        let contents = vec![
            content(11, 1, "Reading list", "Rust ownership in depth", "https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html"),
            content(12, 1, "Reading list", "Async book", "https://rust-lang.github.io/async-book/"),
            content(21, 2, "Recipes", "Kimchi stew", "https://example.com/recipes/kimchi-jjigae"),
        ];
        let user = signed_in.then(|| User {
            id: 1,
            email: "preview@pokit.app".to_string(),
            nickname: "pokit".to_string(),
        });
        Self {
            data: Mutex::new(Data {
                signed_in,
                user,
                categories,
                contents,
                next_content_id: 100,
            }),
        }
    }

    fn page(items: Vec<ContentItem>, page: &Pageable) -> ContentPage {
        let size = page.size.max(1) as usize;
        let start = page.page as usize * size;
        let has_next = items.len() > start + size;
        ContentPage {
            items: items.into_iter().skip(start).take(size).collect(),
            page: page.page,
            has_next,
        }
    }
}

fn category(id: u64, name: &str, content_count: u32) -> Category {
    Category {
        id,
        name: name.to_string(),
        image_url: None,
        content_count,
    }
}

fn content(id: u64, category_id: u64, category_name: &str, title: &str, url: &str) -> ContentItem {
    ContentItem {
        id,
        category_id,
        category_name: category_name.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        memo: String::new(),
        thumbnail: None,
        created_at: "2026.10.01".to_string(),
        is_read: id % 2 == 0,
        is_favorite: id % 3 == 0,
    }
}

async fn latency() {
    tokio::time::sleep(LATENCY).await;
}

#[async_trait]
impl AuthClient for PreviewClient {
    async fn social_login(&self, provider: SocialProvider) -> Result<SocialLoginInfo, ClientError> {
        latency().await;
        let registered = self.data.lock().user.is_some();
        Ok(SocialLoginInfo {
            provider,
            id_token: "preview-id-token".to_string(),
            auth_code: Some("preview-auth-code".to_string()),
            registered,
        })
    }

    async fn auto_login(&self) -> Result<bool, ClientError> {
        latency().await;
        Ok(self.data.lock().signed_in)
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<User, ClientError> {
        latency().await;
        let user = User {
            id: 1,
            email: "preview@pokit.app".to_string(),
            nickname: request.nickname,
        };
        let mut data = self.data.lock();
        data.user = Some(user.clone());
        data.signed_in = true;
        Ok(user)
    }

    async fn logout(&self) -> Result<(), ClientError> {
        latency().await;
        self.data.lock().signed_in = false;
        Ok(())
    }

    async fn withdraw(&self) -> Result<(), ClientError> {
        latency().await;
        let mut data = self.data.lock();
        data.signed_in = false;
        data.user = None;
        Ok(())
    }
}

#[async_trait]
impl UserClient for PreviewClient {
    async fn fetch_user(&self) -> Result<User, ClientError> {
        latency().await;
        self.data.lock().user.clone().ok_or(ClientError::Unauthorized)
    }

    async fn is_nickname_duplicated(&self, nickname: &str) -> Result<bool, ClientError> {
        latency().await;
        Ok(nickname.eq_ignore_ascii_case("admin"))
    }

    async fn update_nickname(&self, nickname: &str) -> Result<User, ClientError> {
        latency().await;
        let mut data = self.data.lock();
        let user = data.user.as_mut().ok_or(ClientError::Unauthorized)?;
        user.nickname = nickname.to_string();
        Ok(user.clone())
    }
}

#[async_trait]
impl CategoryClient for PreviewClient {
    async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        latency().await;
        Ok(self.data.lock().categories.clone())
    }

    async fn category_contents(
        &self,
        category_id: u64,
        page: Pageable,
    ) -> Result<ContentPage, ClientError> {
        latency().await;
        let items = self
            .data
            .lock()
            .contents
            .iter()
            .filter(|item| item.category_id == category_id)
            .cloned()
            .collect();
        Ok(Self::page(items, &page))
    }

    async fn delete_category(&self, category_id: u64) -> Result<(), ClientError> {
        latency().await;
        let mut data = self.data.lock();
        let before = data.categories.len();
        data.categories.retain(|category| category.id != category_id);
        if data.categories.len() == before {
            return Err(ClientError::NotFound);
        }
        data.contents.retain(|item| item.category_id != category_id);
        Ok(())
    }
}

#[async_trait]
impl ContentClient for PreviewClient {
    async fn content_detail(&self, content_id: u64) -> Result<ContentDetail, ClientError> {
        latency().await;
        let data = self.data.lock();
        let item = data
            .contents
            .iter()
            .find(|item| item.id == content_id)
            .ok_or(ClientError::NotFound)?;
        Ok(ContentDetail {
            id: item.id,
            category_id: item.category_id,
            category_name: item.category_name.clone(),
            title: item.title.clone(),
            url: item.url.clone(),
            memo: item.memo.clone(),
            created_at: item.created_at.clone(),
            is_favorite: item.is_favorite,
            remind: false,
        })
    }

    async fn delete_content(&self, content_id: u64) -> Result<(), ClientError> {
        latency().await;
        let mut data = self.data.lock();
        let before = data.contents.len();
        data.contents.retain(|item| item.id != content_id);
        if data.contents.len() == before {
            return Err(ClientError::NotFound);
        }
        Ok(())
    }

    async fn set_favorite(&self, content_id: u64, favorite: bool) -> Result<bool, ClientError> {
        latency().await;
        let mut data = self.data.lock();
        let item = data
            .contents
            .iter_mut()
            .find(|item| item.id == content_id)
            .ok_or(ClientError::NotFound)?;
        item.is_favorite = favorite;
        Ok(favorite)
    }

    async fn save_content(&self, draft: ContentDraft) -> Result<ContentItem, ClientError> {
        latency().await;
        let mut data = self.data.lock();
        let category_id = draft.category_id.unwrap_or(1);
        let category_name = data
            .categories
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.name.clone())
            .ok_or(ClientError::NotFound)?;
        let id = match draft.id {
            Some(id) => id,
            None => {
                data.next_content_id += 1;
                data.next_content_id
            }
        };
        let item = ContentItem {
            id,
            category_id,
            category_name,
            title: draft.title,
            url: draft.url,
            memo: draft.memo,
            thumbnail: draft.thumbnail,
            created_at: "2026.10.19".to_string(),
            is_read: false,
            is_favorite: false,
        };
        data.contents.retain(|existing| existing.id != id);
        data.contents.push(item.clone());
        Ok(item)
    }
}

#[async_trait]
impl RemindClient for PreviewClient {
    async fn today(&self) -> Result<Vec<ContentItem>, ClientError> {
        latency().await;
        Ok(self.data.lock().contents.iter().take(3).cloned().collect())
    }

    async fn unread(&self, page: Pageable) -> Result<ContentPage, ClientError> {
        latency().await;
        let items = self
            .data
            .lock()
            .contents
            .iter()
            .filter(|item| !item.is_read)
            .cloned()
            .collect();
        Ok(Self::page(items, &page))
    }

    async fn favorites(&self, page: Pageable) -> Result<ContentPage, ClientError> {
        latency().await;
        let items = self
            .data
            .lock()
            .contents
            .iter()
            .filter(|item| item.is_favorite)
            .cloned()
            .collect();
        Ok(Self::page(items, &page))
    }
}

#[async_trait]
impl LinkPresentation for PreviewClient {
    async fn metadata(&self, url: &str) -> LinkMetadata {
        latency().await;
        let title = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.replace('-', " "));
        LinkMetadata {
            title,
            image_url: None,
        }
    }
}

#[async_trait]
impl SystemSettings for PreviewClient {
    async fn open_settings(&self) {
        tracing::info!("opening system settings");
    }
}
