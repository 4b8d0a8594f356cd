//! ---
//! uikit_section: "01-core-functionality"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Timing control helpers for UI components."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
//! Deferred-callback primitive backed by the tokio timer wheel.

use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{sleep, Instant};

use crate::error::Result;

/// Clock and deferred-callback source shared by the timing wrappers.
///
/// Cloning is cheap; every clone drives timers on the same runtime.
#[derive(Debug, Clone)]
pub struct Timer {
    handle: Handle,
}

impl Timer {
    /// Bind to the runtime of the calling context.
    pub fn current() -> Result<Self> {
        Ok(Self {
            handle: Handle::try_current()?,
        })
    }

    /// Bind to an explicit runtime handle, for hosts that call in from foreign threads.
    pub fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }

    /// Monotonic time as seen by the runtime (honours a paused test clock).
    ///
    /// Reads the bound runtime's clock even when called from a foreign thread.
    pub fn now(&self) -> Instant {
        let _runtime = self.handle.enter();
        Instant::now()
    }

    /// Run `callback` once `delay` has elapsed unless the returned handle is cancelled first.
    pub fn schedule<F>(&self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let task = self.handle.spawn(async move {
            sleep(delay).await;
            callback();
        });
        TimerHandle {
            abort: task.abort_handle(),
        }
    }

    pub(crate) fn spawn<F>(&self, future: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(future)
    }
}

/// Cancellation handle for a timer armed through [`Timer::schedule`].
#[derive(Debug)]
pub struct TimerHandle {
    abort: AbortHandle,
}

impl TimerHandle {
    /// Prevent the callback from running if it has not started yet.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Whether the timer has fired, been cancelled, or otherwise completed.
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}
