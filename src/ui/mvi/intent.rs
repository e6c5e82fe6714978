/// Marker trait for intents fed to a [`Reducer`](super::Reducer).
///
/// In this crate intents describe command outcomes (an item was synced, a
/// command failed) and render requests, never raw input events.
pub trait Intent: Send + 'static {}
