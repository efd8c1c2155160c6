//! Thread-sleep pacer.
//!
//! Implements [`Pacer`] with `std::thread::sleep`.
//!
//! - [`PacingMode::FixedDelay`] sleeps one full period after the cycle's
//!   I/O, so the real cycle time is period + I/O time.
//! - [`PacingMode::FixedRate`] sleeps until the next period boundary,
//!   counted from [`Pacer::start`]. If a cycle overruns, the schedule
//!   restarts from now instead of bursting to catch up.

use std::time::{Duration, Instant};

use log::trace;

use crate::app::ports::Pacer;
use crate::config::PacingMode;

pub struct ThreadPacer {
    mode: PacingMode,
    next_deadline: Option<Instant>,
}

impl ThreadPacer {
    pub fn new(mode: PacingMode) -> Self {
        Self {
            mode,
            next_deadline: None,
        }
    }

    /// Anchor the fixed-rate schedule at `now`.
    fn anchor(&mut self, now: Instant) {
        if self.mode == PacingMode::FixedRate {
            self.next_deadline = Some(now);
        }
    }

    /// How long to sleep at `now`, advancing the fixed-rate schedule.
    fn sleep_for(&mut self, now: Instant, period: Duration) -> Duration {
        match self.mode {
            PacingMode::FixedDelay => period,
            PacingMode::FixedRate => {
                let deadline = self.next_deadline.unwrap_or(now) + period;
                if deadline <= now {
                    trace!("pacer overrun by {:?}", now - deadline);
                    self.next_deadline = Some(now);
                    return Duration::ZERO;
                }
                self.next_deadline = Some(deadline);
                deadline - now
            }
        }
    }
}

impl Pacer for ThreadPacer {
    fn start(&mut self) {
        self.anchor(Instant::now());
    }

    fn pace(&mut self, period: Duration) {
        let wait = self.sleep_for(Instant::now(), period);
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}
