//! Log-based report sink adapter.
//!
//! Implements [`ReportSink`] by writing loop events through the `log`
//! facade.  Samples go out at `info` in the operator-facing
//! `Roll=.. Pitch=.. Yaw=..` form; transient bus faults at `warn`.

use log::{debug, error, info, warn};

use crate::app::events::LoopEvent;
use crate::app::ports::ReportSink;

/// Adapter that logs every [`LoopEvent`].
pub struct LogReportSink;

impl LogReportSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogReportSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for LogReportSink {
    fn emit(&mut self, event: &LoopEvent) {
        match event {
            LoopEvent::Started {
                command,
                cycle_budget,
            } => match cycle_budget {
                Some(n) => info!(
                    "START | left={} right={} | {} cycles",
                    command.left(), command.right(), n
                ),
                None => info!(
                    "START | left={} right={} | until interrupted (Ctrl-C to quit)",
                    command.left(), command.right()
                ),
            },
            LoopEvent::Sample { frame, .. } => {
                info!("{frame}");
            }
            LoopEvent::ReadFailed { cycle, error } => {
                warn!("cycle {cycle}: {error}");
            }
            LoopEvent::WriteFailed { cycle, error } => {
                warn!("cycle {cycle}: {error}");
            }
            LoopEvent::PhaseChanged { from, to } => {
                debug!("PHASE | {:?} -> {:?}", from, to);
            }
            LoopEvent::SafetyStop(None) => {
                info!("STOP | safety stop sent");
            }
            LoopEvent::SafetyStop(Some(e)) => {
                error!("STOP | safety stop failed: {e}");
            }
            LoopEvent::Finished(s) => {
                info!(
                    "DONE | reason={:?} | cycles={} samples={} read_err={} write_err={} | stop_sent={}",
                    s.stop_reason,
                    s.cycles,
                    s.samples,
                    s.read_failures,
                    s.write_failures,
                    s.safety_stop_delivered,
                );
            }
        }
    }
}
