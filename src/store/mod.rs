//! Transactional view-state store.
//!
//! Holds one immutable state record and replaces it only through
//! [`StateStore::update`]. Transforms run on the store's
//! [`DispatchContext`] under a single writer lock, so every transform sees the
//! record produced by the one before it and no update is lost.

mod context;
mod feed;
mod lifecycle;

pub use context::{DispatchContext, Immediate, Job, MainLoop};
pub use feed::{Feed, Subscription};
pub use lifecycle::Lifecycle;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::oneshot;

use crate::mvi::UiState;

/// Cloneable handle to a shared state record.
pub struct StateStore<S: UiState> {
    inner: Arc<StoreInner<S>>,
}

impl<S: UiState> Clone for StateStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct StoreInner<S> {
    /// Latest published record. Written only while `writer` is held.
    current: RwLock<S>,
    /// Writer lock; also guards subscriber registration so a new
    /// subscriber never misses or duplicates a record.
    writer: Mutex<Feed<S>>,
    version: AtomicU64,
    context: Arc<dyn DispatchContext>,
    lifecycle: Lifecycle,
}

impl<S: UiState> StateStore<S> {
    /// Create a store holding `initial`, serializing work on `context`.
    pub fn new(initial: S, context: Arc<dyn DispatchContext>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                current: RwLock::new(initial),
                writer: Mutex::new(Feed::new()),
                version: AtomicU64::new(0),
                context,
                lifecycle: Lifecycle::new(),
            }),
        }
    }

    /// Current record. Never waits on a transform in progress.
    pub fn read(&self) -> S {
        self.inner.current.read().clone()
    }

    /// Number of records published since construction.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::SeqCst)
    }

    /// Apply `transform` to the latest record and publish the result.
    ///
    /// The transform runs on the dispatch context. Transforms must be pure:
    /// calling back into the store from inside one is not supported.
    /// After teardown this is a silent no-op.
    pub fn update<F>(&self, transform: F)
    where
        F: FnOnce(S) -> S + Send + 'static,
    {
        if self.inner.lifecycle.is_torn_down() {
            tracing::trace!("update after teardown dropped");
            return;
        }
        let inner = Arc::clone(&self.inner);
        self.inner
            .context
            .dispatch(Box::new(move || inner.apply(transform)));
    }

    /// Run `effect` on the dispatch context after all previously posted work.
    ///
    /// Dropped if the store is torn down before the effect runs.
    pub fn post<F>(&self, effect: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let lifecycle = self.inner.lifecycle.clone();
        self.inner.context.dispatch(Box::new(move || {
            if lifecycle.is_torn_down() {
                tracing::trace!("effect after teardown dropped");
                return;
            }
            effect();
        }));
    }

    /// Resolve once every transform and effect posted before this call ran.
    pub async fn settled(&self) {
        let (tx, rx) = oneshot::channel();
        self.inner.context.dispatch(Box::new(move || {
            let _ = tx.send(());
        }));
        // A dropped barrier means the context is gone; nothing is pending.
        let _ = rx.await;
    }

    /// Current record first, then every published record in order.
    ///
    /// After teardown the subscription yields the final record and ends.
    pub fn subscribe(&self) -> Subscription<S> {
        let mut feed = self.inner.writer.lock();
        let current = self.inner.current.read().clone();
        feed.subscribe_with(current)
    }

    /// Stop accepting work and end every subscription.
    ///
    /// Pipelines feeding the store observe the lifecycle and exit; updates
    /// already queued on the dispatch context are discarded when they run.
    pub fn teardown(&self) {
        if !self.inner.lifecycle.tear_down() {
            return;
        }
        self.inner.writer.lock().close();
        tracing::debug!(version = self.version(), "store torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.lifecycle.is_torn_down()
    }

    /// Lifecycle handle for tasks that feed this store.
    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.lifecycle.clone()
    }
}

impl<S: UiState> StoreInner<S> {
    fn apply<F>(&self, transform: F)
    where
        F: FnOnce(S) -> S,
    {
        let mut feed = self.writer.lock();
        // Checked under the writer lock: teardown closes the feed under the
        // same lock, so nothing is published after it.
        if self.lifecycle.is_torn_down() {
            tracing::trace!("queued update discarded after teardown");
            return;
        }
        let base = self.current.read().clone();
        let next = transform(base);
        *self.current.write() = next.clone();
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        feed.publish(&next);
        tracing::trace!(version, subscribers = feed.subscriber_count(), "state published");
    }
}
