//! Execution contexts that serialize store work.
//!
//! Every transform and every side effect posted to a store runs through a
//! [`DispatchContext`]. Async sources complete wherever their runtime
//! schedules them and hop onto the context before touching state.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Unit of work executed on a dispatch context.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Capability to run jobs on the store's logical "main" context.
///
/// Implementations must run jobs from a single caller in the order they were
/// dispatched.
pub trait DispatchContext: Send + Sync + 'static {
    fn dispatch(&self, job: Job);
}

/// Runs every job inline on the calling thread.
///
/// Ordering across threads comes from the store's writer lock only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl DispatchContext for Immediate {
    fn dispatch(&self, job: Job) {
        job();
    }
}

/// Single-consumer FIFO queue drained by one tokio task.
///
/// This is the explicit form of a UI main thread: jobs from every producer
/// are executed one at a time, in arrival order.
#[derive(Clone)]
pub struct MainLoop {
    sender: mpsc::UnboundedSender<Job>,
}

impl MainLoop {
    /// Spawn the draining task on the current tokio runtime.
    ///
    /// The task exits once every `MainLoop` clone has been dropped and the
    /// queue is empty.
    pub fn spawn() -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
        let handle = tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                job();
            }
            tracing::debug!("main loop drained");
        });
        (Self { sender }, handle)
    }
}

impl DispatchContext for MainLoop {
    fn dispatch(&self, job: Job) {
        if self.sender.send(job).is_err() {
            tracing::trace!("main loop gone, job dropped");
        }
    }
}
