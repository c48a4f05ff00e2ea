//! Re-invocable asynchronous operations ("interactors").
//!
//! An [`OperationHandle`] owns one logical operation: its last parameters,
//! a feed of completed results and a monotonically increasing invocation
//! counter. Re-invoking does not cancel in-flight work; how overlapping
//! completions are published is governed by [`StalePolicy`].

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use uuid::Uuid;

use crate::error::SourceError;
use crate::store::{Feed, Subscription};

/// One asynchronous computation, parameterised once and executed many times.
#[async_trait]
pub trait Interactor: Send + Sync + 'static {
    /// Parameters stored by `set_params` and reused by every invocation.
    type Params: Clone + Send + Sync + 'static;
    /// Per-invocation arguments.
    type ExecuteParams: Send + 'static;
    type Output: Clone + Send + Sync + 'static;

    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    async fn execute(
        &self,
        params: Self::Params,
        execute: Self::ExecuteParams,
    ) -> Result<Self::Output, SourceError>;
}

/// How completions of overlapping invocations are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Publish every completion in the order it finishes. A slow, older
    /// invocation can overwrite the result of a newer one.
    #[default]
    LastWriteWins,
    /// Drop a completion whose invocation is older than one already published.
    DiscardOutOfOrder,
}

pub type OperationResult<T> = Result<T, SourceError>;

struct Published<T> {
    feed: Feed<OperationResult<T>>,
    latest: Option<OperationResult<T>>,
    latest_sequence: u64,
}

struct HandleInner<I: Interactor> {
    id: Uuid,
    runtime: Handle,
    interactor: I,
    policy: StalePolicy,
    params: Mutex<Option<I::Params>>,
    published: Mutex<Published<I::Output>>,
    issued: AtomicU64,
    in_flight: AtomicUsize,
}

/// Shared handle to one logical operation.
pub struct OperationHandle<I: Interactor> {
    inner: Arc<HandleInner<I>>,
}

impl<I: Interactor> Clone for OperationHandle<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: Interactor> OperationHandle<I> {
    pub fn new(interactor: I) -> Self {
        Self::with_policy(interactor, StalePolicy::default())
    }

    /// Must be called from within a tokio runtime; every invocation is
    /// spawned onto that runtime, whichever thread calls `invoke`.
    pub fn with_policy(interactor: I, policy: StalePolicy) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                id: Uuid::new_v4(),
                runtime: Handle::current(),
                interactor,
                policy,
                params: Mutex::new(None),
                published: Mutex::new(Published {
                    feed: Feed::new(),
                    latest: None,
                    latest_sequence: 0,
                }),
                issued: AtomicU64::new(0),
                in_flight: AtomicUsize::new(0),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn name(&self) -> &'static str {
        self.inner.interactor.name()
    }

    pub fn policy(&self) -> StalePolicy {
        self.inner.policy
    }

    /// Store parameters for subsequent invocations. Does not execute.
    pub fn set_params(&self, params: I::Params) {
        *self.inner.params.lock() = Some(params);
    }

    /// Start the operation with the last parameters set.
    ///
    /// Returns the invocation's sequence number. May be called from any
    /// thread. Without parameters, the invocation completes with
    /// [`SourceError::ParamsNotSet`].
    pub fn invoke(&self, execute: I::ExecuteParams) -> u64 {
        let sequence = self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let params = self.inner.params.lock().clone();
        self.inner.in_flight.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            operation = self.name(),
            id = %self.inner.id,
            sequence,
            "operation invoked"
        );

        let inner = Arc::clone(&self.inner);
        self.inner.runtime.spawn(async move {
            let result = match params {
                Some(params) => inner.interactor.execute(params, execute).await,
                None => Err(SourceError::ParamsNotSet {
                    operation: inner.interactor.name(),
                }),
            };
            inner.in_flight.fetch_sub(1, Ordering::SeqCst);
            inner.complete(sequence, result);
        });
        sequence
    }

    /// Fresh feed of results from invocations completing after this call.
    pub fn results(&self) -> Subscription<OperationResult<I::Output>> {
        self.inner.published.lock().feed.subscribe()
    }

    /// Most recently published result.
    pub fn latest(&self) -> Option<OperationResult<I::Output>> {
        self.inner.published.lock().latest.clone()
    }

    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }
}

impl<I: Interactor> HandleInner<I> {
    fn complete(&self, sequence: u64, result: OperationResult<I::Output>) {
        let mut published = self.published.lock();
        if self.policy == StalePolicy::DiscardOutOfOrder && sequence < published.latest_sequence {
            tracing::debug!(
                operation = self.interactor.name(),
                sequence,
                newer = published.latest_sequence,
                "stale completion discarded"
            );
            return;
        }
        if let Err(err) = &result {
            tracing::warn!(operation = self.interactor.name(), sequence, error = %err, "operation failed");
        }
        published.latest_sequence = published.latest_sequence.max(sequence);
        published.feed.publish(&result);
        published.latest = Some(result);
    }
}
