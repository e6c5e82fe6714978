//! The list item model.

mod identity;

pub use identity::{IdentityAllocator, ItemId};

use std::fmt;
use time::OffsetDateTime;

/// Shown when an add is attempted with blank text.
pub const EMPTY_TEXT_MESSAGE: &str = "Todo cannot be empty";

/// A single list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    pub completed: bool,
    /// Set once at creation.
    pub created_at: OffsetDateTime,
}

/// Fields sent to the store when creating an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub text: String,
    pub completed: bool,
    pub created_at: OffsetDateTime,
}

impl ItemDraft {
    /// Build a draft from user text, or `None` if the trimmed text is empty.
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            completed: false,
            created_at: OffsetDateTime::now_utc(),
        })
    }

    /// The optimistic item inserted while the create is in flight.
    pub fn to_item(&self, id: ItemId) -> Item {
        Item {
            id,
            text: self.text.clone(),
            completed: self.completed,
            created_at: self.created_at,
        }
    }
}

/// Full replacement of an item's mutable fields for an update request.
///
/// Built from the last known state of the item with exactly one field
/// changed, so the request never carries guesses about other fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPatch {
    pub text: String,
    pub completed: bool,
    pub created_at: OffsetDateTime,
}

impl ItemPatch {
    /// Known state of `item`, with `completed` flipped.
    pub fn toggled(item: &Item) -> Self {
        Self {
            text: item.text.clone(),
            completed: !item.completed,
            created_at: item.created_at,
        }
    }
}

/// In-flight marker for an item whose confirmed state is not yet known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOperation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for PendingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PendingOperation::Create => "create",
            PendingOperation::Update => "update",
            PendingOperation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Read-only row handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: ItemId,
    pub text: String,
    pub completed: bool,
    /// Rows with a pending operation should be rendered non-interactive.
    pub pending: Option<PendingOperation>,
}
