//! Remote store client.
//!
//! The store is an opaque CRUD endpoint. [`RemoteStore`] is the seam the
//! sync engine talks to; [`HttpStore`] is the JSON-over-HTTP implementation.

mod client;
mod error;
mod wire;

pub use client::HttpStore;
pub use error::StoreError;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::item::{Item, ItemDraft, ItemId, ItemPatch};

/// An entry of a list snapshot.
///
/// `created_at` is `None` when the store did not report one; the collection
/// then keeps the timestamp it already knows for that identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedItem {
    pub id: ItemId,
    pub text: String,
    pub completed: bool,
    pub created_at: Option<OffsetDateTime>,
}

impl From<Item> for ListedItem {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            text: item.text,
            completed: item.completed,
            created_at: Some(item.created_at),
        }
    }
}

/// Result of a delete request that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The store removed the item.
    Deleted,
    /// The item was already gone upstream.
    NotFound,
}

/// Typed access to the items endpoint.
///
/// Implementations classify every failure into a [`StoreError`] and never
/// panic across this boundary.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the full item list.
    async fn list(&self) -> Result<Vec<ListedItem>, StoreError>;

    /// Create an item. The returned item carries the store-assigned identity.
    async fn create(&self, draft: &ItemDraft) -> Result<Item, StoreError>;

    /// Replace the mutable fields of `id` with `patch`.
    async fn update(&self, id: &ItemId, patch: &ItemPatch) -> Result<Item, StoreError>;

    /// Delete `id`. A missing item is reported as [`DeleteOutcome::NotFound`].
    async fn delete(&self, id: &ItemId) -> Result<DeleteOutcome, StoreError>;
}
