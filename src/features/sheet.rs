//! Content bottom sheet shared by the list screens.

use crate::domain::ContentItem;

/// Entry picked from a content's bottom sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetItem {
    Share,
    Edit,
    Favorite,
    Delete,
}

/// What a list screen does with a sheet entry for `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetOutcome {
    Share(String),
    Edit(u64),
    SetFavorite { id: u64, favorite: bool },
    ConfirmDelete(u64),
}

impl SheetItem {
    pub fn outcome(self, content: &ContentItem) -> SheetOutcome {
        match self {
            SheetItem::Share => SheetOutcome::Share(content.url.clone()),
            SheetItem::Edit => SheetOutcome::Edit(content.id),
            SheetItem::Favorite => SheetOutcome::SetFavorite {
                id: content.id,
                favorite: !content.is_favorite,
            },
            SheetItem::Delete => SheetOutcome::ConfirmDelete(content.id),
        }
    }
}
