//! Loop phases and per-run bookkeeping.
//!
//! ```text
//!  Idle ──run()──▶ Running ──cancel / budget──▶ Stopping ──stop+close──▶ Terminated
//!                   │  ▲
//!                   └──┘ every cycle, I/O errors included
//! ```

/// Control loop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Constructed; bus open, no cycle run yet.
    Idle,
    /// Cyclic read/write.
    Running,
    /// Safety-stop write in flight.
    Stopping,
    /// Bus closed; nothing more will happen.
    Terminated,
}

impl Phase {
    /// Whether `self → next` is a legal edge.
    pub fn can_transition_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Idle, Phase::Running)
                | (Phase::Running, Phase::Stopping)
                | (Phase::Stopping, Phase::Terminated)
        )
    }
}

/// Mutable state owned solely by the control loop.
#[derive(Debug, Clone)]
pub struct LoopState {
    pub phase: Phase,
    /// Completed cycles.  Monotonic.
    pub cycle_count: u64,
    /// Cycles after which the loop stops on its own; `None` = unbounded.
    pub cycle_budget: Option<u64>,
    pub samples: u64,
    pub read_failures: u64,
    pub write_failures: u64,
}

impl LoopState {
    pub fn new(cycle_budget: Option<u64>) -> Self {
        Self {
            phase: Phase::Idle,
            cycle_count: 0,
            cycle_budget,
            samples: 0,
            read_failures: 0,
            write_failures: 0,
        }
    }

    pub fn budget_exhausted(&self) -> bool {
        self.cycle_budget
            .is_some_and(|budget| self.cycle_count >= budget)
    }
}
