//! Time-shift stream adapter.

use std::collections::VecDeque;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use tokio::time::{sleep_until, Instant};

struct Delayed<T> {
    upstream: BoxStream<'static, T>,
    pending: VecDeque<(Instant, T)>,
    exhausted: bool,
}

enum Step<T> {
    Due,
    Arrived(Option<T>),
}

/// Shift every emission of `upstream` by `delay`, measured from its arrival.
///
/// Spacing between emissions and their order are preserved. Emissions still
/// pending when the upstream ends are delivered before the stream ends.
pub fn delayed<T>(upstream: BoxStream<'static, T>, delay: Duration) -> BoxStream<'static, T>
where
    T: Send + 'static,
{
    let state = Delayed {
        upstream,
        pending: VecDeque::new(),
        exhausted: false,
    };

    stream::unfold(state, move |mut state| async move {
        loop {
            let deadline = state.pending.front().map(|(deadline, _)| *deadline);
            let step = match (deadline, state.exhausted) {
                (None, true) => return None,
                (None, false) => Step::Arrived(state.upstream.next().await),
                (Some(deadline), true) => {
                    sleep_until(deadline).await;
                    Step::Due
                }
                (Some(deadline), false) => tokio::select! {
                    biased;
                    _ = sleep_until(deadline) => Step::Due,
                    next = state.upstream.next() => Step::Arrived(next),
                },
            };

            match step {
                Step::Due => {
                    if let Some((_, value)) = state.pending.pop_front() {
                        return Some((value, state));
                    }
                }
                Step::Arrived(Some(value)) => {
                    state.pending.push_back((Instant::now() + delay, value));
                }
                Step::Arrived(None) => state.exhausted = true,
            }
        }
    })
    .boxed()
}
