//! Model-View-Intent (MVI) primitives for the presentation boundary.
//!
//! ```text
//! Command ──→ Engine ──→ Intent ──→ Reducer ──→ State ──→ View
//! ```
//!
//! - **State**: what the presentation layer last rendered, plus the error slot
//! - **Intent**: the outcome of a command or a render
//! - **Reducer**: pure `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
