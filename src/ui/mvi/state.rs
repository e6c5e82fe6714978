/// Marker trait for view state.
///
/// View state is replaced wholesale on every intent, so it must be cheap to
/// clone and comparable for change detection.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
