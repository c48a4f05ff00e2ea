//! Multicast feed with per-subscriber unbounded queues.
//!
//! Every subscriber sees every published value in publication order; nothing
//! is coalesced or dropped while the subscriber is alive.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc;

pub struct Feed<T> {
    subscribers: Vec<mpsc::UnboundedSender<T>>,
    closed: bool,
}

impl<T: Clone> Feed<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            closed: false,
        }
    }

    /// Register a subscriber that receives only future publications.
    pub fn subscribe(&mut self) -> Subscription<T> {
        let (sender, receiver) = mpsc::unbounded_channel();
        if !self.closed {
            self.subscribers.push(sender);
        }
        Subscription { receiver }
    }

    /// Register a subscriber whose first value is `current`.
    pub fn subscribe_with(&mut self, current: T) -> Subscription<T> {
        let (sender, receiver) = mpsc::unbounded_channel();
        // The receiver is alive, so the first send cannot fail.
        let _ = sender.send(current);
        if !self.closed {
            self.subscribers.push(sender);
        }
        Subscription { receiver }
    }

    /// Deliver `value` to every live subscriber, pruning dropped ones.
    pub fn publish(&mut self, value: &T) {
        self.subscribers
            .retain(|subscriber| subscriber.send(value.clone()).is_ok());
    }

    /// Drop every sender so subscriptions end after draining.
    pub fn close(&mut self) {
        self.closed = true;
        self.subscribers.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Clone> Default for Feed<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of a [`Feed`].
///
/// Usable either through [`recv`](Self::recv) or as a [`Stream`].
pub struct Subscription<T> {
    receiver: mpsc::UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    /// Wait for the next value; `None` once the feed is closed and drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// Take the next value if one is already queued.
    pub fn try_recv(&mut self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Drain every value queued right now.
    pub fn drain(&mut self) -> Vec<T> {
        let mut values = Vec::new();
        while let Ok(value) = self.receiver.try_recv() {
            values.push(value);
        }
        values
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.receiver.poll_recv(cx)
    }
}
