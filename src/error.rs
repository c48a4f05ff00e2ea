//! Errors surfaced by asynchronous sources and operations.

use thiserror::Error;

/// Failure of an asynchronous source or operation.
///
/// Failures never propagate into the store. Pipelines wrap them in
/// [`Async::Fail`](crate::pipeline::Async) and the reducer decides which
/// previous value or default the affected field keeps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("{source_name} failed: {message}")]
    Failed {
        source_name: String,
        message: String,
    },

    #[error("operation '{operation}' invoked before parameters were set")]
    ParamsNotSet { operation: &'static str },
}

impl SourceError {
    /// Convenience constructor for collaborator failures.
    pub fn failed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
