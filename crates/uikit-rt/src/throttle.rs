//! ---
//! uikit_section: "01-core-functionality"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Timing control helpers for UI components."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use uikit_common::time::{duration_to_millis, remaining_wait};
use uikit_logging::{uikit_debug, LogContext};

use crate::error::Result;
use crate::metrics::Edge;
use crate::timer::{Timer, TimerHandle};
use crate::WrapperOptions;

const KIND: &str = "throttle";

/// Rate-limits a callback to at most one run per `delay`, with a leading
/// run inside the triggering call and a trailing run from a timer.
///
/// Clones share state: they are the same wrapped function.
pub struct Throttle<A> {
    inner: Arc<ThrottleInner<A>>,
}

struct ThrottleInner<A> {
    callback: Box<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    timer: Timer,
    options: WrapperOptions,
    state: Mutex<ThrottleState<A>>,
}

struct ThrottleState<A> {
    last_executed: Option<Instant>,
    pending: Option<PendingCall<A>>,
    generation: u64,
}

struct PendingCall<A> {
    handle: TimerHandle,
    args: A,
    generation: u64,
}

/// Wrap `callback` in a [`Throttle`] driven by the current tokio runtime.
pub fn throttle<A, F>(callback: F, delay: Duration) -> Result<Throttle<A>>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Ok(Throttle::new(callback, delay, Timer::current()?))
}

impl<A> Throttle<A>
where
    A: Send + 'static,
{
    pub fn new<F>(callback: F, delay: Duration, timer: Timer) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::with_options(callback, delay, timer, WrapperOptions::default())
    }

    pub fn with_options<F>(
        callback: F,
        delay: Duration,
        timer: Timer,
        options: WrapperOptions,
    ) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ThrottleInner {
                callback: Box::new(callback),
                delay,
                timer,
                options,
                state: Mutex::new(ThrottleState {
                    last_executed: None,
                    pending: None,
                    generation: 0,
                }),
            }),
        }
    }

    /// Invoke the wrapped callback now if the window has passed, otherwise
    /// defer it so that the newest `args` run once the window closes.
    pub fn call(&self, args: A) {
        let inner = &self.inner;
        let now = inner.timer.now();
        let mut state = inner.state.lock();
        let elapsed = state
            .last_executed
            .map(|last| now.saturating_duration_since(last));
        let remaining = remaining_wait(inner.delay, elapsed);

        if remaining.is_zero() {
            let superseded = state.pending.take();
            state.last_executed = Some(now);
            drop(state);
            // Superseded args are dropped unlocked; their Drop may re-enter the wrapper.
            if let Some(pending) = superseded {
                pending.handle.cancel();
                uikit_debug!(
                    context = inner.log_context(),
                    "window elapsed before trailing timer; running immediately"
                );
            }
            if let Some(metrics) = &inner.options.metrics {
                metrics.record_invocation(KIND, Edge::Leading);
            }
            (inner.callback)(args);
            return;
        }

        if let Some(metrics) = &inner.options.metrics {
            metrics.record_suppressed(KIND);
        }
        let replaced = match state.pending.as_mut() {
            Some(pending) => Some(std::mem::replace(&mut pending.args, args)),
            None => {
                state.generation = state.generation.wrapping_add(1);
                let generation = state.generation;
                let target = Arc::clone(inner);
                let handle = inner
                    .timer
                    .schedule(remaining, move || target.fire(generation));
                uikit_debug!(
                    context = inner.log_context(),
                    "trailing call armed in {}ms",
                    duration_to_millis(remaining)
                );
                state.pending = Some(PendingCall {
                    handle,
                    args,
                    generation,
                });
                None
            }
        };
        drop(state);
        drop(replaced);
    }

    /// Whether a trailing invocation is waiting on its timer.
    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().pending.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }
}

impl<A> ThrottleInner<A> {
    fn fire(&self, generation: u64) {
        let mut state = self.state.lock();
        let args = match state.pending.take() {
            Some(pending) if pending.generation == generation => pending.args,
            stale => {
                state.pending = stale;
                return;
            }
        };
        state.last_executed = Some(self.timer.now());
        drop(state);
        if let Some(metrics) = &self.options.metrics {
            metrics.record_invocation(KIND, Edge::Trailing);
        }
        (self.callback)(args);
    }

    fn log_context(&self) -> LogContext<'_> {
        self.options
            .log_context(KIND)
            .with_delay_ms(duration_to_millis(self.delay))
    }
}

impl<A> Clone for Throttle<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> std::fmt::Debug for Throttle<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("delay", &self.inner.delay)
            .field("label", &self.inner.options.label)
            .finish_non_exhaustive()
    }
}
