//! Item list client kept in sync with a remote CRUD store.
//!
//! Local changes are applied optimistically and reconciled with the store's
//! answer: confirmed, rewritten to the store-assigned identity, or rolled
//! back. Items are always addressed by identity; positions from the
//! presentation layer are resolved once, in [`ui::list::CommandSurface`].

pub mod config;
pub mod error;
pub mod item;
pub mod store;
pub mod sync;
pub mod ui;

pub use error::SyncError;
