//! ---
//! uikit_section: "01-core-functionality"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Shared primitives and utilities for the component runtime."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
//! Core shared primitives for the UI-Kit workspace.
//! This crate exposes configuration loading, tracing initialisation and
//! the time arithmetic used by the timing utilities.

pub mod config;
pub mod logging;
pub mod time;

pub use config::{LoadedUikitConfig, LoggingConfig, MicrotaskStrategy, TimingConfig, UikitConfig};
pub use logging::{init_tracing, LogFormat};
