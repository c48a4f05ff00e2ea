/// Record held by a [`StateStore`](crate::store::StateStore).
///
/// Every update publishes a fresh clone to readers and subscribers.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
