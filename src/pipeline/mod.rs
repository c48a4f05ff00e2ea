//! Stream combinator that drives asynchronous sources into a store.
//!
//! A [`Pipeline`] wraps one source stream and applies, in the order the
//! builder methods are called: an optional delay, an optional
//! distinct-consecutive filter and any side-effect triggers. Finally
//! [`Pipeline::execute`] turns each surviving emission into a store update.

mod async_value;
mod delay;
mod effect;

pub use async_value::Async;
pub use delay::delayed;
pub use effect::SideEffect;

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{BoxStream, Stream, StreamExt};
use tokio::task::JoinHandle;

use crate::error::SourceError;
use crate::mvi::UiState;
use crate::store::StateStore;

/// Stream of results produced by an asynchronous source.
pub type SourceStream<T> = BoxStream<'static, Result<T, SourceError>>;

pub struct Pipeline<T> {
    name: &'static str,
    stream: SourceStream<T>,
}

impl<T> Pipeline<T>
where
    T: Send + 'static,
{
    pub fn new<St>(name: &'static str, source: St) -> Self
    where
        St: Stream<Item = Result<T, SourceError>> + Send + 'static,
    {
        Self {
            name,
            stream: source.boxed(),
        }
    }

    /// Hold every emission for `delay` before it reaches later stages.
    pub fn delay(self, delay: Duration) -> Self {
        Self {
            name: self.name,
            stream: delayed(self.stream, delay),
        }
    }

    /// Drop an emission equal to the previous emission of this source.
    pub fn distinct_until_changed(self) -> Self
    where
        T: PartialEq + Clone,
    {
        let name = self.name;
        let stream = self
            .stream
            .scan(None::<Result<T, SourceError>>, move |last, item| {
                let repeated = last.as_ref() == Some(&item);
                if repeated {
                    tracing::trace!(source = name, "duplicate emission suppressed");
                } else {
                    *last = Some(item.clone());
                }
                futures::future::ready(Some((!repeated).then_some(item)))
            })
            .filter_map(futures::future::ready)
            .boxed();
        Self { name, stream }
    }

    /// Run `effect` for every emission that reaches this stage, before it is
    /// forwarded to the transform.
    pub fn on_transition<S: UiState>(self, effect: SideEffect<S, Result<T, SourceError>>) -> Self {
        let stream = self
            .stream
            .inspect(move |item| {
                effect.observe(item);
            })
            .boxed();
        Self {
            name: self.name,
            stream,
        }
    }

    /// Apply every emission to `store` through `reducer`.
    ///
    /// The task ends when the source completes or the store is torn down.
    pub fn execute<S, F>(self, store: &StateStore<S>, reducer: F) -> PipelineHandle
    where
        S: UiState,
        F: Fn(S, Async<T>) -> S + Send + Sync + 'static,
    {
        let name = self.name;
        let store = store.clone();
        let lifecycle = store.lifecycle();
        let reducer = Arc::new(reducer);
        let mut stream = self.stream;

        let task = tokio::spawn(async move {
            loop {
                let item = tokio::select! {
                    biased;
                    _ = lifecycle.wait() => {
                        tracing::debug!(source = name, "pipeline stopped by teardown");
                        break;
                    }
                    item = stream.next() => item,
                };
                let Some(item) = item else {
                    tracing::debug!(source = name, "source completed");
                    break;
                };
                if let Err(err) = &item {
                    tracing::warn!(source = name, error = %err, "source emitted failure");
                }
                let value = Async::from(item);
                let reducer = Arc::clone(&reducer);
                store.update(move |state| reducer(state, value));
            }
        });

        PipelineHandle { name, task }
    }

    /// Pipeline over a source that never fails.
    pub fn infallible<St>(name: &'static str, source: St) -> Self
    where
        St: Stream<Item = T> + Send + 'static,
    {
        Self::new(name, source.map(Ok))
    }
}

/// Running pipeline task.
pub struct PipelineHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl PipelineHandle {
    /// Wait for the pipeline task to end.
    pub async fn join(self) {
        if let Err(err) = self.task.await {
            if !err.is_cancelled() {
                tracing::warn!(source = self.name, error = %err, "pipeline task failed");
            }
        }
    }
}
