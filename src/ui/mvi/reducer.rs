use super::intent::Intent;
use super::state::UiState;

/// The only place view state changes.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// Pure transition: no I/O, no access to the engine.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
