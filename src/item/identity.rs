//! Item identities and the process-wide local identity allocator.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide source of local identities. Never reset, never reused.
static NEXT_LOCAL_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of an item in the collection.
///
/// Items start with a [`ItemId::Local`] identity handed out by the
/// [`IdentityAllocator`] and switch to the [`ItemId::Store`] identity once the
/// remote store confirms the create. A store identity never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemId {
    /// Assigned locally at creation, before the store has answered.
    Local(u64),
    /// Assigned by the remote store.
    Store(String),
}

impl ItemId {
    /// Wrap an identity returned by the remote store.
    pub fn store(id: impl Into<String>) -> Self {
        ItemId::Store(id.into())
    }

    /// True while the item only exists locally.
    pub fn is_local(&self) -> bool {
        matches!(self, ItemId::Local(_))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Local(n) => write!(f, "local-{}", n),
            ItemId::Store(id) => f.write_str(id),
        }
    }
}

/// Hands out local identities.
///
/// The counter is shared by every allocator in the process, so identities
/// stay unique even across engines and regardless of how many items were
/// deleted in between.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityAllocator;

impl IdentityAllocator {
    pub fn new() -> Self {
        Self
    }

    pub fn allocate(&self) -> ItemId {
        ItemId::Local(NEXT_LOCAL_ID.fetch_add(1, Ordering::Relaxed))
    }
}
