use crate::error::SyncError;
use crate::item::{ItemId, ItemView};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListState {
    /// Rows as last handed out for rendering. Positional references from
    /// the presentation layer index into this, not into the live collection.
    pub rendered: Vec<ItemView>,
    /// Most recent command failure, cleared by the next success.
    pub last_error: Option<SyncError>,
}

impl UiState for ListState {}

impl ListState {
    /// Identity of the row rendered at `index`.
    pub fn identity_at(&self, index: usize) -> Option<&ItemId> {
        self.rendered.get(index).map(|row| &row.id)
    }
}
