//! The canonical item collection and its per-item pending markers.

use std::collections::{HashMap, HashSet};

use time::OffsetDateTime;

use crate::error::SyncError;
use crate::item::{Item, ItemId, ItemView, PendingOperation};
use crate::store::ListedItem;

struct Entry {
    item: Item,
    pending: Option<PendingOperation>,
    /// Refresh generation the entry was inserted in.
    epoch: u64,
}

/// Ordered items keyed by identity. Positions are never used as keys.
#[derive(Default)]
pub(crate) struct Collection {
    entries: Vec<Entry>,
    /// Bumped by every snapshot replacement.
    epoch: u64,
}

impl Collection {
    fn position(&self, id: &ItemId) -> Option<usize> {
        self.entries.iter().position(|e| &e.item.id == id)
    }

    fn entry_mut(&mut self, id: &ItemId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| &e.item.id == id)
    }

    /// Take the entry out of its pending `op` state, if it is in it.
    fn settle(&mut self, id: &ItemId, op: PendingOperation) -> Option<&mut Item> {
        let entry = self.entry_mut(id)?;
        if entry.pending != Some(op) {
            return None;
        }
        entry.pending = None;
        Some(&mut entry.item)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn pending(&self, id: &ItemId) -> Option<PendingOperation> {
        self.entries
            .iter()
            .find(|e| &e.item.id == id)
            .and_then(|e| e.pending)
    }

    /// Append an optimistic item in `pendingCreate`.
    pub(crate) fn insert_pending_create(&mut self, item: Item) -> Result<(), SyncError> {
        if self.position(&item.id).is_some() {
            return Err(SyncError::Conflict { id: item.id });
        }
        self.entries.push(Entry {
            item,
            pending: Some(PendingOperation::Create),
            epoch: self.epoch,
        });
        Ok(())
    }

    /// Mark `id` as having `op` in flight and hand out the item for the
    /// optimistic change. Rejects unknown or already pending items.
    pub(crate) fn begin(
        &mut self,
        id: &ItemId,
        op: PendingOperation,
    ) -> Result<&mut Item, SyncError> {
        let entry = self
            .entry_mut(id)
            .ok_or_else(|| SyncError::NotFound { id: id.clone() })?;
        if let Some(operation) = entry.pending {
            return Err(SyncError::Pending {
                id: id.clone(),
                operation,
            });
        }
        entry.pending = Some(op);
        Ok(&mut entry.item)
    }

    /// Rewrite a local identity to the store-assigned one. The pending marker
    /// lives on the entry, so it follows the item to its new identity.
    pub(crate) fn reconcile(&mut self, local: &ItemId, store: ItemId) -> Result<(), SyncError> {
        if !local.is_local() {
            return Err(SyncError::Conflict { id: local.clone() });
        }
        if &store == local {
            return Ok(());
        }
        if self.position(&store).is_some() {
            return Err(SyncError::Conflict { id: store });
        }
        let entry = self
            .entry_mut(local)
            .ok_or_else(|| SyncError::NotFound { id: local.clone() })?;
        entry.item.id = store;
        Ok(())
    }

    /// Apply a confirmed create to the optimistic entry `local`.
    ///
    /// If the store identity is already present, the local entry is dropped.
    /// When a refresh ran while the create was in flight, the snapshot
    /// already carries the confirmed item and that is not an error;
    /// otherwise it is a duplicate identity.
    pub(crate) fn confirm_create(
        &mut self,
        local: &ItemId,
        confirmed: Item,
    ) -> Result<ItemId, SyncError> {
        let Some(pos) = self.position(local) else {
            return Err(SyncError::NotFound { id: local.clone() });
        };

        if &confirmed.id != local && self.position(&confirmed.id).is_some() {
            let entry = self.entries.remove(pos);
            if entry.epoch != self.epoch {
                return Ok(confirmed.id);
            }
            return Err(SyncError::Conflict { id: confirmed.id });
        }

        self.reconcile(local, confirmed.id.clone())?;
        let item = self
            .settle(&confirmed.id, PendingOperation::Create)
            .ok_or_else(|| SyncError::NotFound {
                id: confirmed.id.clone(),
            })?;
        item.text = confirmed.text;
        item.completed = confirmed.completed;
        Ok(confirmed.id)
    }

    /// Keep the optimistic update, adopting whatever the store echoed.
    pub(crate) fn confirm_update(&mut self, id: &ItemId, confirmed: Item) {
        if let Some(item) = self.settle(id, PendingOperation::Update) {
            item.text = confirmed.text;
            item.completed = confirmed.completed;
        }
    }

    /// Undo an optimistic toggle.
    pub(crate) fn rollback_update(&mut self, id: &ItemId, previous_completed: bool) {
        if let Some(item) = self.settle(id, PendingOperation::Update) {
            item.completed = previous_completed;
        }
    }

    /// Drop the pending `op` marker and leave the item as it is.
    pub(crate) fn clear_pending(&mut self, id: &ItemId, op: PendingOperation) {
        self.settle(id, op);
    }

    pub(crate) fn remove(&mut self, id: &ItemId) -> Option<Item> {
        let pos = self.position(id)?;
        Some(self.entries.remove(pos).item)
    }

    /// Replace the collection with a store snapshot.
    ///
    /// Items still waiting for their create are appended after the snapshot
    /// in their previous relative order. Update and delete markers survive
    /// for identities the snapshot still contains. Duplicate identities in
    /// the snapshot keep their first occurrence.
    ///
    /// A listed item without a creation time keeps the one already known for
    /// its identity, or gets the current time when it is seen for the first
    /// time.
    pub(crate) fn replace(&mut self, snapshot: Vec<ListedItem>) -> usize {
        let mut carried: HashMap<ItemId, PendingOperation> = HashMap::new();
        let mut known_created: HashMap<ItemId, OffsetDateTime> = HashMap::new();
        let mut creating = Vec::new();
        for entry in self.entries.drain(..) {
            match entry.pending {
                Some(PendingOperation::Create) => creating.push(entry),
                Some(op) => {
                    carried.insert(entry.item.id.clone(), op);
                    known_created.insert(entry.item.id, entry.item.created_at);
                }
                None => {
                    known_created.insert(entry.item.id, entry.item.created_at);
                }
            }
        }

        self.epoch += 1;
        let observed_at = OffsetDateTime::now_utc();
        let mut seen = HashSet::with_capacity(snapshot.len());
        for listed in snapshot {
            if !seen.insert(listed.id.clone()) {
                tracing::warn!(item_id = %listed.id, "Dropping duplicate identity from snapshot");
                continue;
            }
            let created_at = listed
                .created_at
                .or_else(|| known_created.get(&listed.id).copied())
                .unwrap_or(observed_at);
            let item = Item {
                id: listed.id,
                text: listed.text,
                completed: listed.completed,
                created_at,
            };
            let pending = carried.get(&item.id).copied();
            self.entries.push(Entry {
                item,
                pending,
                epoch: self.epoch,
            });
        }

        let merged = creating.len();
        self.entries.extend(creating);
        merged
    }

    pub(crate) fn views(&self) -> Vec<ItemView> {
        self.entries
            .iter()
            .map(|e| ItemView {
                id: e.item.id.clone(),
                text: e.item.text.clone(),
                completed: e.item.completed,
                pending: e.pending,
            })
            .collect()
    }

    pub(crate) fn items(&self) -> Vec<Item> {
        self.entries.iter().map(|e| e.item.clone()).collect()
    }
}
