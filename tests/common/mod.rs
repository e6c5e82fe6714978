//! Shared test utilities and fake stores.

#![allow(dead_code, unused_imports)]

pub mod mock_store;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use time::OffsetDateTime;
use tokio::sync::Notify;

use todosync::item::{Item, ItemDraft, ItemId, ItemPatch, PendingOperation};
use todosync::store::{DeleteOutcome, ListedItem, RemoteStore, StoreError};
use todosync::sync::SyncEngine;
use todosync::ui::list::CommandSurface;

/// Create a temporary config file with the given contents.
pub fn temp_config(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, contents).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn network_error() -> StoreError {
    StoreError::Network {
        message: "connection refused".to_string(),
    }
}

pub fn server_error() -> StoreError {
    StoreError::Server {
        status: 500,
        message: "boom".to_string(),
    }
}

// -- Scripted store -----------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Create,
    Update,
    Delete,
}

/// What the scripted store does for one call.
#[derive(Debug, Clone)]
pub enum Action {
    /// Behave like a well-mannered store.
    Default,
    Fail(StoreError),
    /// Create: answer with this identity.
    AssignId(String),
    /// Delete: answer with this outcome.
    Outcome(DeleteOutcome),
}

struct Reply {
    gate: Option<Arc<Notify>>,
    action: Action,
}

/// In-memory [`RemoteStore`] whose answers can be scripted and held back.
///
/// Unscripted calls behave like a real store over `server` state: creates
/// assign the next free numeric id, updates and deletes of unknown ids are
/// not found.
pub struct ScriptedStore {
    server: Mutex<Vec<Item>>,
    next_id: AtomicU64,
    replies: Mutex<HashMap<Op, VecDeque<Reply>>>,
    calls: Mutex<Vec<(Op, Option<ItemId>)>>,
    patches: Mutex<Vec<(ItemId, ItemPatch)>>,
}

impl ScriptedStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            server: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            patches: Mutex::new(Vec::new()),
        })
    }

    /// Store pre-populated with `(id, text, completed)` rows.
    pub fn with_items(rows: &[(&str, &str, bool)]) -> Arc<Self> {
        let store = Self::new();
        store.set_server(rows);
        store
    }

    pub fn set_server(&self, rows: &[(&str, &str, bool)]) {
        *self.server.lock() = rows
            .iter()
            .map(|(id, text, completed)| Item {
                id: ItemId::store(*id),
                text: text.to_string(),
                completed: *completed,
                created_at: OffsetDateTime::UNIX_EPOCH,
            })
            .collect();
    }

    pub fn server_items(&self) -> Vec<Item> {
        self.server.lock().clone()
    }

    /// Queue the answer for the next call of `op`.
    pub fn script(&self, op: Op, action: Action) {
        self.replies
            .lock()
            .entry(op)
            .or_default()
            .push_back(Reply { gate: None, action });
    }

    /// Queue an answer that is held back until the returned gate is notified.
    pub fn gate(&self, op: Op, action: Action) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.replies.lock().entry(op).or_default().push_back(Reply {
            gate: Some(gate.clone()),
            action,
        });
        gate
    }

    pub fn calls(&self) -> Vec<(Op, Option<ItemId>)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, op: Op) -> usize {
        self.calls.lock().iter().filter(|(o, _)| *o == op).count()
    }

    pub fn patches(&self) -> Vec<(ItemId, ItemPatch)> {
        self.patches.lock().clone()
    }

    async fn next_action(&self, op: Op, id: Option<&ItemId>) -> Action {
        self.calls.lock().push((op, id.cloned()));
        let reply = self
            .replies
            .lock()
            .get_mut(&op)
            .and_then(|queue| queue.pop_front());
        match reply {
            Some(Reply { gate, action }) => {
                if let Some(gate) = gate {
                    gate.notified().await;
                }
                action
            }
            None => Action::Default,
        }
    }

    fn insert(&self, id: ItemId, draft: &ItemDraft) -> Item {
        let item = draft.to_item(id);
        self.server.lock().push(item.clone());
        item
    }
}

#[async_trait]
impl RemoteStore for ScriptedStore {
    async fn list(&self) -> Result<Vec<ListedItem>, StoreError> {
        match self.next_action(Op::List, None).await {
            Action::Fail(err) => Err(err),
            _ => Ok(self
                .server_items()
                .into_iter()
                .map(ListedItem::from)
                .collect()),
        }
    }

    async fn create(&self, draft: &ItemDraft) -> Result<Item, StoreError> {
        match self.next_action(Op::Create, None).await {
            Action::Fail(err) => Err(err),
            Action::AssignId(id) => Ok(self.insert(ItemId::store(id), draft)),
            _ => {
                let id = loop {
                    let n = self.next_id.fetch_add(1, Ordering::SeqCst);
                    let id = ItemId::store(n.to_string());
                    if !self.server.lock().iter().any(|item| item.id == id) {
                        break id;
                    }
                };
                Ok(self.insert(id, draft))
            }
        }
    }

    async fn update(&self, id: &ItemId, patch: &ItemPatch) -> Result<Item, StoreError> {
        self.patches.lock().push((id.clone(), patch.clone()));
        match self.next_action(Op::Update, Some(id)).await {
            Action::Fail(err) => Err(err),
            _ => {
                let mut server = self.server.lock();
                let item = server
                    .iter_mut()
                    .find(|item| &item.id == id)
                    .ok_or(StoreError::NotFound)?;
                item.text = patch.text.clone();
                item.completed = patch.completed;
                Ok(item.clone())
            }
        }
    }

    async fn delete(&self, id: &ItemId) -> Result<DeleteOutcome, StoreError> {
        let action = self.next_action(Op::Delete, Some(id)).await;
        if let Action::Fail(err) = action {
            return Err(err);
        }
        let mut server = self.server.lock();
        let existed = server.iter().any(|item| &item.id == id);
        server.retain(|item| &item.id != id);
        match action {
            Action::Outcome(outcome) => Ok(outcome),
            _ if existed => Ok(DeleteOutcome::Deleted),
            _ => Ok(DeleteOutcome::NotFound),
        }
    }
}

// -- Engine helpers -----------------------------------------------------------

pub fn engine_with(store: Arc<ScriptedStore>) -> Arc<SyncEngine> {
    Arc::new(SyncEngine::init(store))
}

pub fn surface_with(store: Arc<ScriptedStore>) -> CommandSurface {
    CommandSurface::new(engine_with(store))
}

/// Yield until `id` has `op` in flight.
pub async fn wait_for_pending(engine: &SyncEngine, id: &ItemId, op: PendingOperation) {
    for _ in 0..1000 {
        if engine.pending(id) == Some(op) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("{} never became pending {}", id, op);
}

/// Yield until the store has seen `count` calls of `op`.
pub async fn wait_for_calls(store: &ScriptedStore, op: Op, count: usize) {
    for _ in 0..1000 {
        if store.call_count(op) >= count {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("store never saw {} {:?} calls", count, op);
}

pub fn texts(engine: &SyncEngine) -> Vec<String> {
    engine.items().into_iter().map(|item| item.text).collect()
}
