/// A filter selection or one emission of an asynchronous source, carried to
/// the reducer.
pub trait Intent: Send + 'static {}
