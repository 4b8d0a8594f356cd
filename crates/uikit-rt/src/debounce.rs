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
use uikit_common::time::duration_to_millis;
use uikit_logging::{uikit_debug, LogContext};

use crate::error::Result;
use crate::metrics::Edge;
use crate::timer::{Timer, TimerHandle};
use crate::WrapperOptions;

const KIND: &str = "debounce";

/// Delays a callback until `delay` has passed without another call, then
/// runs it once with the last call's arguments.
pub struct Debounce<A> {
    inner: Arc<DebounceInner<A>>,
}

struct DebounceInner<A> {
    callback: Box<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    timer: Timer,
    options: WrapperOptions,
    state: Mutex<DebounceState<A>>,
}

struct DebounceState<A> {
    pending: Option<PendingCall<A>>,
    generation: u64,
}

struct PendingCall<A> {
    handle: TimerHandle,
    args: A,
    generation: u64,
}

/// Wrap `callback` in a [`Debounce`] driven by the current tokio runtime.
pub fn debounce<A, F>(callback: F, delay: Duration) -> Result<Debounce<A>>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Ok(Debounce::new(callback, delay, Timer::current()?))
}

impl<A> Debounce<A>
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
            inner: Arc::new(DebounceInner {
                callback: Box::new(callback),
                delay,
                timer,
                options,
                state: Mutex::new(DebounceState {
                    pending: None,
                    generation: 0,
                }),
            }),
        }
    }

    /// Restart the quiet window; `args` replace whatever the previous call queued.
    pub fn call(&self, args: A) {
        let inner = &self.inner;
        let mut state = inner.state.lock();
        let previous = state.pending.take();
        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;
        let target = Arc::clone(inner);
        let handle = inner
            .timer
            .schedule(inner.delay, move || target.fire(generation));
        state.pending = Some(PendingCall {
            handle,
            args,
            generation,
        });
        drop(state);

        // Dropped unlocked: the old args' Drop may call back into this wrapper.
        // A stale timer that slips through is rejected by its generation.
        if let Some(previous) = previous {
            previous.handle.cancel();
            if let Some(metrics) = &inner.options.metrics {
                metrics.record_suppressed(KIND);
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().pending.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }
}

impl<A> DebounceInner<A> {
    fn fire(&self, generation: u64) {
        let mut state = self.state.lock();
        let args = match state.pending.take() {
            Some(pending) if pending.generation == generation => pending.args,
            stale => {
                state.pending = stale;
                uikit_debug!(
                    context = self.log_context(),
                    "superseded timer fired; ignoring"
                );
                return;
            }
        };
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

impl<A> Clone for Debounce<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> std::fmt::Debug for Debounce<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounce")
            .field("delay", &self.inner.delay)
            .field("label", &self.inner.options.label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::{sleep, Instant};

    use super::*;
    use crate::metrics::{new_registry, TimingMetrics};

    fn recording() -> (
        Arc<Mutex<Vec<(&'static str, Instant)>>>,
        impl Fn(&'static str) + Send + Sync,
    ) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        (calls, move |tag| sink.lock().push((tag, Instant::now())))
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_into_one_call_with_last_args() {
        let start = Instant::now();
        let (calls, callback) = recording();
        let debounced = debounce(callback, Duration::from_millis(50)).unwrap();

        debounced.call("t0");
        sleep(Duration::from_millis(20)).await;
        debounced.call("t20");
        sleep(Duration::from_millis(20)).await;
        debounced.call("t40");

        sleep(Duration::from_millis(49)).await;
        assert!(calls.lock().is_empty());
        assert!(debounced.is_pending());
        sleep(Duration::from_millis(2)).await;

        let calls = calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "t40");
        assert_eq!((calls[0].1 - start).as_millis(), 90);
        assert!(!debounced.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn single_call_fires_after_delay() {
        let start = Instant::now();
        let (calls, callback) = recording();
        let debounced = debounce(callback, Duration::from_millis(50)).unwrap();

        debounced.call("only");
        assert!(calls.lock().is_empty());
        sleep(Duration::from_millis(200)).await;

        let calls = calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!((calls[0].1 - start).as_millis(), 50);
    }

    #[tokio::test(start_paused = true)]
    async fn separated_bursts_each_fire_once() {
        let (calls, callback) = recording();
        let debounced = debounce(callback, Duration::from_millis(30)).unwrap();

        debounced.call("a1");
        debounced.call("a2");
        sleep(Duration::from_millis(40)).await;
        debounced.call("b1");
        sleep(Duration::from_millis(10)).await;
        debounced.call("b2");
        sleep(Duration::from_millis(40)).await;

        let seen: Vec<&str> = calls.lock().iter().map(|(tag, _)| *tag).collect();
        assert_eq!(seen, vec!["a2", "b2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn metrics_count_superseded_calls() {
        let metrics = TimingMetrics::new(new_registry()).unwrap();
        let (_calls, callback) = recording();
        let debounced = Debounce::with_options(
            callback,
            Duration::from_millis(10),
            Timer::current().unwrap(),
            WrapperOptions::new().with_metrics(metrics.clone()),
        );

        debounced.call("x");
        debounced.call("y");
        debounced.call("z");
        sleep(Duration::from_millis(20)).await;

        assert_eq!(metrics.suppressed(KIND), 2);
        assert_eq!(metrics.invocations(KIND, Edge::Trailing), 1);
        assert_eq!(metrics.invocations(KIND, Edge::Leading), 0);
    }

    /// Reference model: a call runs `delay` after itself unless another call
    /// lands within that window.
    fn expected_debounce(delay: u64, gaps: &[u64]) -> Vec<(usize, u64)> {
        let mut at = 0;
        let times: Vec<u64> = gaps
            .iter()
            .map(|gap| {
                at += gap;
                at
            })
            .collect();
        times
            .iter()
            .enumerate()
            .filter(|(index, t)| match times.get(index + 1) {
                Some(next) => {
                    assert_ne!(next - *t, delay, "call collides with a timer deadline");
                    next - *t > delay
                }
                None => true,
            })
            .map(|(index, t)| (index, t + delay))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn arbitrary_gap_sequences_match_the_debounce_model() {
        const DELAY: u64 = 30;
        const TAGS: [&str; 8] = ["c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7"];
        let cases: &[&[u64]] = &[
            &[0],
            &[0, 29, 29, 29],
            &[0, 31, 31, 31],
            &[0, 5, 40, 5, 5, 100],
            &[0, 1, 1, 1, 1, 1, 1, 1],
            &[0, 10, 45, 10, 29, 31, 2],
        ];

        for gaps in cases {
            let start = Instant::now();
            let (calls, callback) = recording();
            let debounced = debounce(callback, Duration::from_millis(DELAY)).unwrap();

            let mut at = 0;
            for (index, gap) in gaps.iter().enumerate() {
                at += gap;
                tokio::time::sleep_until(start + Duration::from_millis(at)).await;
                debounced.call(TAGS[index]);
            }
            sleep(Duration::from_millis(DELAY * 3)).await;

            let recorded: Vec<(&str, u64)> = calls
                .lock()
                .iter()
                .map(|(tag, when)| (*tag, (*when - start).as_millis() as u64))
                .collect();
            let expected: Vec<(&str, u64)> = expected_debounce(DELAY, gaps)
                .into_iter()
                .map(|(index, when)| (TAGS[index], when))
                .collect();
            assert_eq!(recorded, expected, "gaps {:?}", gaps);
            assert!(!debounced.is_pending());
        }
    }

    struct DropHook {
        tag: &'static str,
        on_drop: Arc<dyn Fn() + Send + Sync>,
    }

    impl Drop for DropHook {
        fn drop(&mut self) {
            (self.on_drop)();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_args_may_reenter_the_wrapper_on_drop() {
        let slot: Arc<Mutex<Option<Debounce<DropHook>>>> = Arc::new(Mutex::new(None));
        let drops = Arc::new(Mutex::new(Vec::new()));
        let reentry = slot.clone();
        let drop_log = drops.clone();
        let on_drop: Arc<dyn Fn() + Send + Sync> = Arc::new(move || {
            if let Some(me) = reentry.lock().clone() {
                drop_log.lock().push(me.is_pending());
            }
        });

        let ran = Arc::new(Mutex::new(Vec::new()));
        let sink = ran.clone();
        let debounced = debounce(
            move |hook: DropHook| sink.lock().push(hook.tag),
            Duration::from_millis(20),
        )
        .unwrap();
        *slot.lock() = Some(debounced.clone());
        let hook = |tag| DropHook {
            tag,
            on_drop: on_drop.clone(),
        };

        debounced.call(hook("a"));
        debounced.call(hook("b"));
        debounced.call(hook("c"));
        sleep(Duration::from_millis(30)).await;

        assert_eq!(*ran.lock(), vec!["c"]);
        assert_eq!(*drops.lock(), vec![true, true, false]);
    }
}
