//! ---
//! uikit_section: "01-core-functionality"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Timing control helpers for UI components."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
//! Timing control for UI components: microtask scheduling, throttling and
//! debouncing on top of the tokio timer wheel.

pub mod debounce;
pub mod error;
pub mod metrics;
pub mod microtask;
pub mod throttle;
pub mod timer;

use tracing::info;
use uikit_common::{MicrotaskStrategy, TimingConfig};
use uikit_logging::LogContext;

pub use debounce::{debounce, Debounce};
pub use error::{Result, TimingError};
pub use metrics::{new_registry, Edge, SharedRegistry, TimingMetrics};
pub use microtask::{
    DispatchPrimitive, Microtask, MicrotaskPrimitive, MicrotaskQueue, MicrotaskScheduler,
};
pub use throttle::{throttle, Throttle};
pub use timer::{Timer, TimerHandle};

/// Optional settings shared by [`Throttle`] and [`Debounce`].
#[derive(Debug, Clone, Default)]
pub struct WrapperOptions {
    /// Label attached to log events, e.g. the handler name.
    pub label: Option<String>,
    pub metrics: Option<TimingMetrics>,
}

impl WrapperOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_metrics(mut self, metrics: TimingMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub(crate) fn log_context<'a>(&'a self, component: &'a str) -> LogContext<'a> {
        let ctx = LogContext::new().with_component(component);
        match &self.label {
            Some(label) => ctx.with_instance(label),
            None => ctx,
        }
    }
}

/// Builds timing wrappers and the microtask scheduler from a [`TimingConfig`].
#[derive(Debug, Clone)]
pub struct TimingToolkit {
    timer: Timer,
    config: TimingConfig,
    microtasks: MicrotaskScheduler,
    queue: Option<MicrotaskQueue>,
    metrics: Option<TimingMetrics>,
}

impl TimingToolkit {
    pub fn from_config(config: &TimingConfig, timer: Timer) -> Self {
        let (microtasks, queue) = match config.microtask {
            MicrotaskStrategy::Native => {
                let queue = MicrotaskQueue::new();
                (MicrotaskScheduler::native(queue.clone()), Some(queue))
            }
            MicrotaskStrategy::Channel => (MicrotaskScheduler::channel(&timer), None),
            MicrotaskStrategy::Timer => (MicrotaskScheduler::timer(&timer), None),
        };
        info!(
            microtask = config.microtask.as_str(),
            throttle_delay_ms = uikit_common::time::duration_to_millis(config.throttle_delay),
            debounce_delay_ms = uikit_common::time::duration_to_millis(config.debounce_delay),
            "timing toolkit ready"
        );
        Self {
            timer,
            config: config.clone(),
            microtasks,
            queue,
            metrics: None,
        }
    }

    /// Attach metrics to the scheduler and to every wrapper built afterwards.
    pub fn with_metrics(mut self, metrics: TimingMetrics) -> Self {
        self.microtasks = self.microtasks.with_metrics(metrics.clone());
        self.metrics = Some(metrics);
        self
    }

    /// Throttle `callback` with the configured throttle delay.
    pub fn throttle<A, F>(&self, label: &str, callback: F) -> Throttle<A>
    where
        A: Send + 'static,
        F: Fn(A) + Send + Sync + 'static,
    {
        Throttle::with_options(
            callback,
            self.config.throttle_delay,
            self.timer.clone(),
            self.options(label),
        )
    }

    /// Debounce `callback` with the configured debounce delay.
    pub fn debounce<A, F>(&self, label: &str, callback: F) -> Debounce<A>
    where
        A: Send + 'static,
        F: Fn(A) + Send + Sync + 'static,
    {
        Debounce::with_options(
            callback,
            self.config.debounce_delay,
            self.timer.clone(),
            self.options(label),
        )
    }

    pub fn microtasks(&self) -> &MicrotaskScheduler {
        &self.microtasks
    }

    /// The queue the host must drain at its checkpoint when the native strategy is configured.
    pub fn microtask_queue(&self) -> Option<&MicrotaskQueue> {
        self.queue.as_ref()
    }

    fn options(&self, label: &str) -> WrapperOptions {
        let options = WrapperOptions::new().with_label(label);
        match &self.metrics {
            Some(metrics) => options.with_metrics(metrics.clone()),
            None => options,
        }
    }
}
