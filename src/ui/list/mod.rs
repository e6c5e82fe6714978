//! Command surface for the item list.

mod intent;
mod reducer;
mod state;
mod surface;

pub use intent::ListIntent;
pub use reducer::ListReducer;
pub use state::ListState;
pub use surface::CommandSurface;
