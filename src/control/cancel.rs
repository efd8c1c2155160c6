//! Cancellation token: the loop's `running` flag.
//!
//! Starts running, is cancelled at most once, never resets.  The loop owns
//! one handle and hands clones to whoever delivers the stop request (the
//! signal bridge in production, the test body in tests).
//!
//! Internally the atomic holds "stop requested" so that `signal-hook`'s
//! `flag::register`, which can only set a flag to `true`, drives it
//! directly from signal context.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    stop: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop.  Lock-free; safe from any thread.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// `true` until [`cancel`](Self::cancel) (or a registered signal) fires.
    pub fn is_running(&self) -> bool {
        !self.stop.load(Ordering::Acquire)
    }

    /// The raw flag, for signal registration.
    pub(crate) fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }
}
