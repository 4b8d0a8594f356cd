//! ---
//! uikit_section: "01-core-functionality"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Shared primitives and utilities for the component runtime."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
use std::time::Duration;

/// Convert a duration into whole milliseconds, saturating at `u64::MAX`.
pub fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Time still to wait before `delay` has passed, given `elapsed` since the last run.
///
/// `None` for `elapsed` means nothing has run yet, so there is nothing to wait for.
pub fn remaining_wait(delay: Duration, elapsed: Option<Duration>) -> Duration {
    match elapsed {
        Some(elapsed) => delay.saturating_sub(elapsed),
        None => Duration::ZERO,
    }
}
