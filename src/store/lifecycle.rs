use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Teardown flag shared by a store and every task feeding it.
///
/// Once torn down, a lifecycle never becomes live again.
#[derive(Clone, Default)]
pub struct Lifecycle {
    torn_down: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the owner as torn down and wake every waiter.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn tear_down(&self) -> bool {
        if self.torn_down.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.notify.notify_waiters();
        true
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Resolve once [`tear_down`](Self::tear_down) has been called.
    pub async fn wait(&self) {
        // Register with Notify before reading the flag, otherwise a teardown
        // landing between the check and the await is never observed.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_torn_down() {
            return;
        }
        notified.await;
    }
}
