use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::SyncError;
use crate::item::{ItemId, ItemView};
use crate::store::DeleteOutcome;
use crate::sync::SyncEngine;
use crate::ui::input::DraftInput;
use crate::ui::list::intent::ListIntent;
use crate::ui::list::reducer::ListReducer;
use crate::ui::list::state::ListState;
use crate::ui::mvi::Reducer;

/// Commands available to the presentation layer.
///
/// Rows are addressed by their position in the last [`current_view`]
/// result. The position is turned into an identity here, when the command
/// is issued, and only the identity travels on to the engine.
///
/// [`current_view`]: CommandSurface::current_view
pub struct CommandSurface {
    engine: Arc<SyncEngine>,
    state: Mutex<ListState>,
}

impl CommandSurface {
    pub fn new(engine: Arc<SyncEngine>) -> Self {
        Self {
            engine,
            state: Mutex::new(ListState::default()),
        }
    }

    pub fn engine(&self) -> &Arc<SyncEngine> {
        &self.engine
    }

    fn dispatch(&self, intent: ListIntent) {
        let mut state = self.state.lock();
        *state = ListReducer::reduce(std::mem::take(&mut *state), intent);
    }

    fn record<T>(&self, result: Result<T, SyncError>) -> Result<T, SyncError> {
        match &result {
            Ok(_) => self.dispatch(ListIntent::CommandSucceeded),
            Err(error) => self.dispatch(ListIntent::CommandFailed {
                error: error.clone(),
            }),
        }
        result
    }

    fn resolve(&self, index: usize) -> Result<ItemId, SyncError> {
        self.state
            .lock()
            .identity_at(index)
            .cloned()
            .ok_or(SyncError::IndexOutOfRange { index })
    }

    pub async fn add_item(&self, text: &str) -> Result<ItemId, SyncError> {
        let result = self.engine.add(text).await;
        self.record(result)
    }

    pub async fn toggle_item(&self, index: usize) -> Result<(), SyncError> {
        let result = match self.resolve(index) {
            Ok(id) => self.engine.toggle(&id).await,
            Err(err) => Err(err),
        };
        self.record(result)
    }

    pub async fn delete_item(&self, index: usize) -> Result<DeleteOutcome, SyncError> {
        let result = match self.resolve(index) {
            Ok(id) => self.engine.delete(&id).await,
            Err(err) => Err(err),
        };
        self.record(result)
    }

    pub async fn refresh(&self) -> Result<usize, SyncError> {
        let result = self.engine.refresh().await;
        self.record(result)
    }

    /// Add the drafted text. The draft is cleared only once the add is
    /// accepted, so a rejected entry stays editable.
    pub async fn submit(&self, input: &mut DraftInput) -> Result<ItemId, SyncError> {
        let text = input.text().to_string();
        let id = self.add_item(&text).await?;
        input.clear();
        Ok(id)
    }

    /// Rows to draw now. Positional commands refer to this list until the
    /// next call.
    pub fn current_view(&self) -> Vec<ItemView> {
        let rows = self.engine.snapshot();
        self.dispatch(ListIntent::Render { rows: rows.clone() });
        rows
    }

    pub fn last_error(&self) -> Option<SyncError> {
        self.state.lock().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.dispatch(ListIntent::ClearError);
    }
}
