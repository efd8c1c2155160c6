//! Fixed-period control loop.
//!
//! [`ControlLoop`] owns the bus session, the loop state, and the
//! cancellation token.  Each cycle it reads one sensor frame, writes the
//! speed command, then waits out the period:
//!
//! ```text
//!  ┌──────────── cycle n ─────────────┐
//!  read 6B ─▶ decode ─▶ report sample
//!  encode ─▶ write 2B
//!  pace(period)
//!  cycle_count += 1
//!  └── cancelled? budget spent? ──yes──▶ Stopping: write {0,0}, close
//! ```
//!
//! Bus faults inside a cycle are reported and the cadence continues.  Every
//! way out of `Running` goes through the same stop path, so the `{0, 0}`
//! safety stop is always attempted before the bus is closed.

pub mod cancel;
pub mod state;

use core::time::Duration;

use log::{debug, info, warn};

use crate::app::commands::CommandSpec;
use crate::app::events::{LoopEvent, LoopSummary, StopReason};
use crate::app::ports::{BusTransport, Pacer, ReportSink};
use crate::bus::BusSession;
use crate::codec::{ACTUATOR_FRAME_LEN, ActuatorFrame, decode_sensor, encode_actuator};

use cancel::CancelToken;
use state::{LoopState, Phase};

pub struct ControlLoop<T: BusTransport> {
    bus: BusSession<T>,
    command: CommandSpec,
    /// Encoded once; the command never changes during a run.
    command_bytes: [u8; ACTUATOR_FRAME_LEN],
    state: LoopState,
    cancel: CancelToken,
    period: Duration,
}

impl<T: BusTransport> ControlLoop<T> {
    /// Build a loop around an open bus.  The loop starts in [`Phase::Idle`].
    pub fn new(
        bus: BusSession<T>,
        command: CommandSpec,
        cycle_budget: Option<u64>,
        period: Duration,
    ) -> Self {
        Self {
            bus,
            command,
            command_bytes: encode_actuator(command.actuator_frame()),
            state: LoopState::new(cycle_budget),
            cancel: CancelToken::new(),
            period,
        }
    }

    /// Use an existing token, e.g. one already wired to a signal handler.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle that stops the loop at its next cycle boundary.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn cycle_count(&self) -> u64 {
        self.state.cycle_count
    }

    // ── Run ───────────────────────────────────────────────────

    /// Run until cancelled or out of budget, then send the safety stop and
    /// close the bus.
    pub fn run(mut self, pacer: &mut impl Pacer, sink: &mut impl ReportSink) -> LoopSummary {
        sink.emit(&LoopEvent::Started {
            command: self.command,
            cycle_budget: self.state.cycle_budget,
        });
        self.transition(Phase::Running, sink);
        pacer.start();

        let reason = loop {
            if let Some(reason) = self.stop_condition() {
                break reason;
            }
            self.cycle(sink);
            pacer.pace(self.period);
            self.state.cycle_count += 1;
        };

        self.shutdown(reason, sink)
    }

    /// One read/write cycle.  Never fails; faults become events.
    fn cycle(&mut self, sink: &mut impl ReportSink) {
        let cycle = self.state.cycle_count;

        // 1. Sensor frame
        match self.bus.read_sensor() {
            Ok(raw) => {
                let frame = decode_sensor(&raw);
                self.state.samples += 1;
                debug!("cycle {cycle}: {frame:?}");
                sink.emit(&LoopEvent::Sample { cycle, frame });
            }
            Err(error) => {
                self.state.read_failures += 1;
                sink.emit(&LoopEvent::ReadFailed { cycle, error });
            }
        }

        // 2. Speed command
        if let Err(error) = self.bus.write_actuator(&self.command_bytes) {
            self.state.write_failures += 1;
            sink.emit(&LoopEvent::WriteFailed { cycle, error });
        }
    }

    /// Checked once per cycle boundary, cancellation first.
    fn stop_condition(&self) -> Option<StopReason> {
        if !self.cancel.is_running() {
            return Some(StopReason::Cancelled);
        }
        if self.state.budget_exhausted() {
            return Some(StopReason::BudgetReached);
        }
        None
    }

    // ── Stop path ─────────────────────────────────────────────

    fn shutdown(&mut self, reason: StopReason, sink: &mut impl ReportSink) -> LoopSummary {
        info!(
            "Stopping after {} cycles ({:?})",
            self.state.cycle_count, reason
        );
        self.transition(Phase::Stopping, sink);

        let delivered = self.send_safety_stop(sink);
        self.bus.close();
        self.transition(Phase::Terminated, sink);

        let summary = LoopSummary {
            cycles: self.state.cycle_count,
            samples: self.state.samples,
            read_failures: self.state.read_failures,
            write_failures: self.state.write_failures,
            stop_reason: reason,
            safety_stop_delivered: delivered,
        };
        sink.emit(&LoopEvent::Finished(summary));
        summary
    }

    /// Write `{0, 0}`.  A failure is reported, never retried or escalated.
    fn send_safety_stop(&mut self, sink: &mut impl ReportSink) -> bool {
        let result = self
            .bus
            .write_actuator(&encode_actuator(ActuatorFrame::STOP));
        let delivered = result.is_ok();
        sink.emit(&LoopEvent::SafetyStop(result.err()));
        delivered
    }

    fn transition(&mut self, to: Phase, sink: &mut impl ReportSink) {
        let from = self.state.phase;
        debug_assert!(from.can_transition_to(to), "illegal {from:?} -> {to:?}");
        self.state.phase = to;
        sink.emit(&LoopEvent::PhaseChanged { from, to });
    }
}

impl<T: BusTransport> Drop for ControlLoop<T> {
    /// Unwinding out of `Running` still stops the motors.
    fn drop(&mut self) {
        if self.state.phase == Phase::Running {
            warn!("control loop dropped while running, sending safety stop");
            let _ = self
                .bus
                .write_actuator(&encode_actuator(ActuatorFrame::STOP));
        }
    }
}
