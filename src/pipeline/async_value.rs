use crate::error::SourceError;

/// One emission from an asynchronous source, as seen by a reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Async<T> {
    Success(T),
    Fail(SourceError),
}

impl<T> Async<T> {
    /// The emitted value, or `None` if the source failed.
    pub fn get(&self) -> Option<&T> {
        match self {
            Async::Success(value) => Some(value),
            Async::Fail(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Async::Success(value) => Some(value),
            Async::Fail(_) => None,
        }
    }
}

impl<T> From<Result<T, SourceError>> for Async<T> {
    fn from(result: Result<T, SourceError>) -> Self {
        match result {
            Ok(value) => Async::Success(value),
            Err(err) => Async::Fail(err),
        }
    }
}
