use crate::runtime::Identifiable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub image_url: Option<String>,
    pub content_count: u32,
}

impl Identifiable for Category {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Saved link as it appears in lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub id: u64,
    pub category_id: u64,
    pub category_name: String,
    pub title: String,
    pub url: String,
    pub memo: String,
    pub thumbnail: Option<String>,
    pub created_at: String,
    pub is_read: bool,
    pub is_favorite: bool,
}

impl Identifiable for ContentItem {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Full record of a saved link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDetail {
    pub id: u64,
    pub category_id: u64,
    pub category_name: String,
    pub title: String,
    pub url: String,
    pub memo: String,
    pub created_at: String,
    pub is_favorite: bool,
    pub remind: bool,
}

/// Link being created (`id == None`) or edited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentDraft {
    pub id: Option<u64>,
    pub url: String,
    pub title: String,
    pub memo: String,
    pub category_id: Option<u64>,
    pub thumbnail: Option<String>,
    pub remind: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentListKind {
    Unread,
    Favorite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    pub page: u32,
    pub size: u32,
    pub sort: String,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort: "createdAt,desc".to_string(),
        }
    }
}

impl Pageable {
    pub fn next(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentPage {
    pub items: Vec<ContentItem>,
    pub page: u32,
    pub has_next: bool,
}
