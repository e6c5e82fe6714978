use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::SyncError;
use crate::item::{
    IdentityAllocator, Item, ItemDraft, ItemId, ItemPatch, ItemView, PendingOperation,
    EMPTY_TEXT_MESSAGE,
};
use crate::store::{DeleteOutcome, RemoteStore, StoreError};
use crate::sync::collection::Collection;

/// Owner of the canonical item collection.
///
/// Every operation applies its optimistic change synchronously, awaits the
/// store, then reconciles. The collection lock is only ever taken between
/// awaits, so operations on different items can be in flight at the same
/// time while operations on one item are serialized by its pending marker.
pub struct SyncEngine {
    store: Arc<dyn RemoteStore>,
    allocator: IdentityAllocator,
    collection: Mutex<Collection>,
}

impl SyncEngine {
    /// Create an empty engine. Call [`SyncEngine::refresh`] to load it.
    pub fn init(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            allocator: IdentityAllocator::new(),
            collection: Mutex::new(Collection::default()),
        }
    }

    /// Create an item from `text`.
    ///
    /// Blank text is rejected before anything is touched. Otherwise the item
    /// is appended immediately and removed again if the store refuses it.
    /// Returns the store-assigned identity.
    pub async fn add(&self, text: &str) -> Result<ItemId, SyncError> {
        let draft = ItemDraft::new(text).ok_or_else(|| SyncError::validation(EMPTY_TEXT_MESSAGE))?;
        let local_id = self.allocator.allocate();

        self.collection
            .lock()
            .insert_pending_create(draft.to_item(local_id.clone()))?;

        match self.store.create(&draft).await {
            Ok(confirmed) => {
                let result = self.collection.lock().confirm_create(&local_id, confirmed);
                match &result {
                    Ok(id) => tracing::info!(local_id = %local_id, item_id = %id, "Item created"),
                    Err(err) => tracing::error!(
                        local_id = %local_id,
                        error = %err,
                        "Store confirmation could not be applied"
                    ),
                }
                result
            }
            Err(err) => {
                self.collection.lock().remove(&local_id);
                tracing::warn!(
                    local_id = %local_id,
                    error_type = err.error_type(),
                    error = %err,
                    "Create failed, optimistic item removed"
                );
                Err(err.into())
            }
        }
    }

    /// Flip `completed` on `id`. Reverted if the store update fails.
    pub async fn toggle(&self, id: &ItemId) -> Result<(), SyncError> {
        let (patch, previous) = {
            let mut collection = self.collection.lock();
            let item = collection.begin(id, PendingOperation::Update)?;
            let patch = ItemPatch::toggled(item);
            let previous = item.completed;
            item.completed = patch.completed;
            (patch, previous)
        };

        match self.store.update(id, &patch).await {
            Ok(confirmed) => {
                self.collection.lock().confirm_update(id, confirmed);
                tracing::debug!(item_id = %id, completed = patch.completed, "Item updated");
                Ok(())
            }
            Err(err) => {
                self.collection.lock().rollback_update(id, previous);
                tracing::warn!(
                    item_id = %id,
                    error_type = err.error_type(),
                    error = %err,
                    "Update failed, toggle reverted"
                );
                Err(SyncError::from_store(err, id))
            }
        }
    }

    /// Delete `id`. The item stays visible until the store confirms; an item
    /// that is already gone upstream is removed all the same.
    pub async fn delete(&self, id: &ItemId) -> Result<DeleteOutcome, SyncError> {
        self.collection.lock().begin(id, PendingOperation::Delete)?;

        let outcome = match self.store.delete(id).await {
            Ok(outcome) => outcome,
            Err(StoreError::NotFound) => DeleteOutcome::NotFound,
            Err(err) => {
                self.collection
                    .lock()
                    .clear_pending(id, PendingOperation::Delete);
                tracing::warn!(
                    item_id = %id,
                    error_type = err.error_type(),
                    error = %err,
                    "Delete failed, item kept"
                );
                return Err(SyncError::from_store(err, id));
            }
        };

        self.collection.lock().remove(id);
        tracing::info!(item_id = %id, outcome = ?outcome, "Item deleted");
        Ok(outcome)
    }

    /// Replace the collection with the store's list. Items whose create is
    /// still in flight are kept after the snapshot. On failure the
    /// collection is left untouched.
    ///
    /// Returns the number of items in the collection afterwards.
    pub async fn refresh(&self) -> Result<usize, SyncError> {
        let snapshot = match self.store.list().await {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error_type = err.error_type(), error = %err, "Refresh failed");
                return Err(err.into());
            }
        };

        let mut collection = self.collection.lock();
        let merged = collection.replace(snapshot);
        let total = collection.len();
        tracing::debug!(items = total, pending_creates = merged, "Collection refreshed");
        Ok(total)
    }

    /// Current rows, in display order.
    pub fn snapshot(&self) -> Vec<ItemView> {
        self.collection.lock().views()
    }

    /// Current items, in display order.
    pub fn items(&self) -> Vec<Item> {
        self.collection.lock().items()
    }

    /// The operation in flight for `id`, if any.
    pub fn pending(&self, id: &ItemId) -> Option<PendingOperation> {
        self.collection.lock().pending(id)
    }
}
