//! Side effects triggered by specific emissions of a pipeline.

use std::sync::Arc;

use crate::mvi::UiState;
use crate::store::StateStore;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Effect = Arc<dyn Fn() + Send + Sync>;

/// Fire-and-forget effect posted onto a store's serialized queue.
///
/// The effect runs on the store's dispatch context, after every transform
/// already queued and before the transform for the triggering emission.
/// Once the store is torn down, triggers are dropped.
pub struct SideEffect<S: UiState, T> {
    store: StateStore<S>,
    name: &'static str,
    when: Predicate<T>,
    effect: Effect,
}

impl<S: UiState, T> SideEffect<S, T> {
    pub fn new<P, E>(store: &StateStore<S>, name: &'static str, when: P, effect: E) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        E: Fn() + Send + Sync + 'static,
    {
        Self {
            store: store.clone(),
            name,
            when: Box::new(when),
            effect: Arc::new(effect),
        }
    }

    /// Post the effect if `value` matches. Returns whether it was posted.
    pub fn observe(&self, value: &T) -> bool {
        if !(self.when)(value) {
            return false;
        }
        if self.store.is_torn_down() {
            tracing::trace!(effect = self.name, "trigger after teardown dropped");
            return false;
        }
        tracing::debug!(effect = self.name, "side effect scheduled");
        let effect = Arc::clone(&self.effect);
        self.store.post(move || effect());
        true
    }
}
