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

use anyhow::Result;
use prometheus::{IntCounterVec, Opts, Registry};

/// Shared registry type used by hosts that scrape the timing metrics.
pub type SharedRegistry = Arc<Registry>;

/// Produce a new shared registry.
pub fn new_registry() -> SharedRegistry {
    Arc::new(Registry::new())
}

/// Which side of the quiet window an invocation ran on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Ran synchronously inside the triggering call.
    Leading,
    /// Ran later from a timer.
    Trailing,
}

impl Edge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Leading => "leading",
            Edge::Trailing => "trailing",
        }
    }
}

/// Counters published by the throttle, debounce and microtask utilities.
#[derive(Clone)]
pub struct TimingMetrics {
    registry: SharedRegistry,
    invocations_total: IntCounterVec,
    suppressed_total: IntCounterVec,
    microtasks_total: IntCounterVec,
}

impl TimingMetrics {
    /// Register the timing metric family against the provided registry.
    pub fn new(registry: SharedRegistry) -> Result<Self> {
        let invocations_total = IntCounterVec::new(
            Opts::new(
                "uikit_timing_invocations_total",
                "Wrapped callback invocations by wrapper kind and edge",
            ),
            &["kind", "edge"],
        )?;
        registry.register(Box::new(invocations_total.clone()))?;

        let suppressed_total = IntCounterVec::new(
            Opts::new(
                "uikit_timing_suppressed_total",
                "Calls absorbed into a pending deferred invocation or superseded by a newer call",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(suppressed_total.clone()))?;

        let microtasks_total = IntCounterVec::new(
            Opts::new(
                "uikit_timing_microtasks_total",
                "Microtasks handed to the scheduling primitive",
            ),
            &["strategy"],
        )?;
        registry.register(Box::new(microtasks_total.clone()))?;

        Ok(Self {
            registry,
            invocations_total,
            suppressed_total,
            microtasks_total,
        })
    }

    /// Expose the underlying shared registry for convenience.
    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    pub fn record_invocation(&self, kind: &str, edge: Edge) {
        self.invocations_total
            .with_label_values(&[kind, edge.as_str()])
            .inc();
    }

    pub fn record_suppressed(&self, kind: &str) {
        self.suppressed_total.with_label_values(&[kind]).inc();
    }

    pub fn record_microtask(&self, strategy: &str) {
        self.microtasks_total.with_label_values(&[strategy]).inc();
    }

    /// Current value of the invocation counter, mostly useful in tests.
    pub fn invocations(&self, kind: &str, edge: Edge) -> u64 {
        self.invocations_total
            .with_label_values(&[kind, edge.as_str()])
            .get()
    }

    /// Current value of the suppression counter.
    pub fn suppressed(&self, kind: &str) -> u64 {
        self.suppressed_total.with_label_values(&[kind]).get()
    }

    /// Current value of the microtask counter.
    pub fn microtasks(&self, strategy: &str) -> u64 {
        self.microtasks_total.with_label_values(&[strategy]).get()
    }
}

impl std::fmt::Debug for TimingMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimingMetrics").finish_non_exhaustive()
    }
}
