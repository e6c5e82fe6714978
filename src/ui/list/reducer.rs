use crate::ui::list::intent::ListIntent;
use crate::ui::list::state::ListState;
use crate::ui::mvi::Reducer;

pub struct ListReducer;

impl Reducer for ListReducer {
    type State = ListState;
    type Intent = ListIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ListIntent::Render { rows } => ListState {
                rendered: rows,
                ..state
            },
            ListIntent::CommandSucceeded | ListIntent::ClearError => ListState {
                last_error: None,
                ..state
            },
            ListIntent::CommandFailed { error } => ListState {
                last_error: Some(error),
                ..state
            },
        }
    }
}
