//! ---
//! uikit_section: "01-core-functionality"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Timing control helpers for UI components."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
//! Microtask scheduling over a host-chosen primitive.
//!
//! The host picks exactly one [`MicrotaskPrimitive`] when it builds the
//! [`MicrotaskScheduler`]; nothing is detected at call time. Three primitives
//! ship with the crate:
//!
//! * [`MicrotaskQueue`]: a FIFO the host drains at its microtask checkpoint.
//!   Tasks queued while draining run in the same checkpoint.
//! * [`DispatchPrimitive::channel`]: a dispatcher task woken over a channel.
//! * [`DispatchPrimitive::timer`]: a dispatcher task that waits a zero-length
//!   timer before each callback.
//!
//! All three preserve call order. Only the queue guarantees that every task
//! runs within the same phase.

use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::trace;
use uikit_common::MicrotaskStrategy;
use uikit_logging::{uikit_error, LogContext};

use crate::error::{Result, TimingError};
use crate::metrics::TimingMetrics;
use crate::timer::Timer;

/// A unit of deferred work with no arguments and no result.
pub type Microtask = Box<dyn FnOnce() + Send + 'static>;

/// Host-supplied mechanism that eventually runs queued microtasks in order.
pub trait MicrotaskPrimitive: Send + Sync {
    fn enqueue(&self, task: Microtask) -> Result<()>;

    fn strategy(&self) -> MicrotaskStrategy;
}

/// FIFO microtask queue drained by the host event loop.
#[derive(Clone, Default)]
pub struct MicrotaskQueue {
    tasks: Arc<Mutex<VecDeque<Microtask>>>,
}

impl MicrotaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run queued tasks until the queue is empty, returning how many ran.
    ///
    /// A panicking task unwinds to the caller; tasks behind it stay queued.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.tasks.lock().pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        if ran > 0 {
            trace!(ran, "microtask checkpoint drained");
        }
        ran
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}

impl MicrotaskPrimitive for MicrotaskQueue {
    fn enqueue(&self, task: Microtask) -> Result<()> {
        self.tasks.lock().push_back(task);
        Ok(())
    }

    fn strategy(&self) -> MicrotaskStrategy {
        MicrotaskStrategy::Native
    }
}

impl std::fmt::Debug for MicrotaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MicrotaskQueue")
            .field("queued", &self.len())
            .finish()
    }
}

/// Runtime-driven primitive: a single dispatcher task runs callbacks in arrival order.
#[derive(Debug, Clone)]
pub struct DispatchPrimitive {
    sender: UnboundedSender<Microtask>,
    strategy: MicrotaskStrategy,
}

impl DispatchPrimitive {
    /// Dispatcher that runs each task as soon as the channel wakes it.
    pub fn channel(timer: &Timer) -> Self {
        Self::spawn(timer, MicrotaskStrategy::Channel)
    }

    /// Dispatcher that lets the timer wheel turn once before each task.
    pub fn timer(timer: &Timer) -> Self {
        Self::spawn(timer, MicrotaskStrategy::Timer)
    }

    fn spawn(timer: &Timer, strategy: MicrotaskStrategy) -> Self {
        let (sender, mut receiver) = unbounded_channel::<Microtask>();
        timer.spawn(async move {
            while let Some(task) = receiver.recv().await {
                if strategy == MicrotaskStrategy::Timer {
                    tokio::time::sleep(Duration::ZERO).await;
                }
                if catch_unwind(AssertUnwindSafe(task)).is_err() {
                    let ctx = LogContext::new().with_component("microtask");
                    uikit_error!(
                        context = ctx,
                        "microtask panicked on the {} dispatcher",
                        strategy.as_str()
                    );
                }
            }
        });
        Self { sender, strategy }
    }
}

impl MicrotaskPrimitive for DispatchPrimitive {
    fn enqueue(&self, task: Microtask) -> Result<()> {
        self.sender
            .send(task)
            .map_err(|_| TimingError::DispatcherClosed(self.strategy.as_str()))
    }

    fn strategy(&self) -> MicrotaskStrategy {
        self.strategy
    }
}

/// Schedules callbacks to run after the current synchronous work completes.
#[derive(Clone)]
pub struct MicrotaskScheduler {
    primitive: Arc<dyn MicrotaskPrimitive>,
    metrics: Option<TimingMetrics>,
}

impl MicrotaskScheduler {
    /// Wrap a host-supplied primitive.
    pub fn new(primitive: Arc<dyn MicrotaskPrimitive>) -> Self {
        Self {
            primitive,
            metrics: None,
        }
    }

    /// Scheduler backed by a host-drained queue.
    pub fn native(queue: MicrotaskQueue) -> Self {
        Self::new(Arc::new(queue))
    }

    /// Scheduler backed by a channel-woken dispatcher.
    pub fn channel(timer: &Timer) -> Self {
        Self::new(Arc::new(DispatchPrimitive::channel(timer)))
    }

    /// Scheduler backed by a zero-delay timer dispatcher.
    pub fn timer(timer: &Timer) -> Self {
        Self::new(Arc::new(DispatchPrimitive::timer(timer)))
    }

    pub fn with_metrics(mut self, metrics: TimingMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn strategy(&self) -> MicrotaskStrategy {
        self.primitive.strategy()
    }

    /// Queue `callback`; it runs later with no arguments. Failures are logged, not returned.
    pub fn schedule<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Err(err) = self.try_schedule(callback) {
            let ctx = LogContext::new().with_component("microtask");
            uikit_error!(context = ctx, "dropping microtask: {}", err);
        }
    }

    /// Queue `callback`, reporting a stopped dispatcher to the caller.
    pub fn try_schedule<F>(&self, callback: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.primitive.enqueue(Box::new(callback))?;
        if let Some(metrics) = &self.metrics {
            metrics.record_microtask(self.strategy().as_str());
        }
        Ok(())
    }
}

impl std::fmt::Debug for MicrotaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MicrotaskScheduler")
            .field("strategy", &self.strategy())
            .finish_non_exhaustive()
    }
}
