use crate::error::SyncError;
use crate::item::ItemView;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ListIntent {
    /// The presentation layer is about to draw these rows.
    Render { rows: Vec<ItemView> },
    CommandSucceeded,
    CommandFailed { error: SyncError },
    ClearError,
}

impl Intent for ListIntent {}
