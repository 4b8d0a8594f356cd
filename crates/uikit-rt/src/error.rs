//! ---
//! uikit_section: "01-core-functionality"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Timing control helpers for UI components."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TimingError>;

#[derive(Debug, Error)]
pub enum TimingError {
    #[error("no tokio runtime is available to drive timers")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
    #[error("{0} microtask dispatcher has stopped")]
    DispatcherClosed(&'static str),
}
