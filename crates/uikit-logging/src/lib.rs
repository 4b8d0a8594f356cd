//! ---
//! uikit_section: "03-logging"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Structured logging context and macros."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Structured logging helpers shared by the UI-Kit crates.

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

pub mod macros;

/// Initialize a baseline tracing subscriber suitable for development.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer())
        .try_init();
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Utility emitting the event (`throttle`, `debounce`, `microtask`).
    pub component: Option<&'a str>,
    /// Caller-supplied label distinguishing wrapper instances.
    pub instance: Option<&'a str>,
    /// Configured delay of the wrapper, in milliseconds.
    pub delay_ms: Option<u64>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the emitting component.
    pub fn with_component(mut self, component: &'a str) -> Self {
        self.component = Some(component);
        self
    }

    /// Attach an instance label.
    pub fn with_instance(mut self, instance: &'a str) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Attach the wrapper delay.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}
