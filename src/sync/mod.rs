//! Optimistic mutation and reconciliation of the item collection.
//!
//! Per item, independently of the others:
//!
//! ```text
//! absent ─→ pendingCreate ─→ present ─→ pendingUpdate ─→ present
//!              │ failure        │                │ failure: revert
//!              ↓                ↓
//!           absent        pendingDelete ─→ absent   (success or not found)
//!                                │ other failure
//!                                ↓
//!                             present
//! ```

mod collection;
mod engine;

pub use engine::SyncEngine;
