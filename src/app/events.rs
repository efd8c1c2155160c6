//! Outbound loop events.
//!
//! The [`ControlLoop`](crate::control::ControlLoop) emits these through the
//! [`ReportSink`](super::ports::ReportSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::codec::SensorFrame;
use crate::control::state::Phase;
use crate::error::{ReadError, WriteError};

use super::commands::CommandSpec;

/// Structured events emitted by the control loop.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopEvent {
    /// The loop is about to run its first cycle.
    Started {
        command: CommandSpec,
        cycle_budget: Option<u64>,
    },

    /// A sensor frame was read and decoded.
    Sample { cycle: u64, frame: SensorFrame },

    /// The sensor read failed this cycle; no sample was produced.
    ReadFailed { cycle: u64, error: ReadError },

    /// The speed command write failed this cycle.
    WriteFailed { cycle: u64, error: WriteError },

    /// The loop moved between phases.
    PhaseChanged { from: Phase, to: Phase },

    /// The final `{0, 0}` write was attempted; `None` means it landed.
    SafetyStop(Option<WriteError>),

    /// The loop terminated.
    Finished(LoopSummary),
}

/// Why the loop left `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The cancellation token was cleared (operator interrupt).
    Cancelled,
    /// The configured cycle budget was exhausted.
    BudgetReached,
}

/// Totals for one run of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub cycles: u64,
    pub samples: u64,
    pub read_failures: u64,
    pub write_failures: u64,
    pub stop_reason: StopReason,
    pub safety_stop_delivered: bool,
}
