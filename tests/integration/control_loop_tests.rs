//! Integration tests: ControlLoop → BusSession → mock transport.

use std::time::Duration;

use thrustlink::app::commands::CommandSpec;
use thrustlink::app::events::{LoopEvent, StopReason};
use thrustlink::bus::BusSession;
use thrustlink::codec::SensorFrame;
use thrustlink::control::ControlLoop;
use thrustlink::control::cancel::CancelToken;
use thrustlink::control::state::Phase;

use super::mock_bus::{CountingPacer, MockBus, RecordingSink};

const PERIOD: Duration = Duration::from_millis(10);

fn speeds(left: i8, right: i8) -> CommandSpec {
    CommandSpec::new(left, right, 1).unwrap()
}

// ── Cycle budget ──────────────────────────────────────────────

#[test]
fn budget_runs_exactly_n_cycles() {
    for n in [0u64, 1, 100] {
        let (bus, log) = MockBus::new();
        let ctl = ControlLoop::new(BusSession::new(bus), speeds(20, -20), Some(n), PERIOD);
        let mut pacer = CountingPacer::new();
        let mut sink = RecordingSink::new();

        let summary = ctl.run(&mut pacer, &mut sink);

        let log = log.borrow();
        assert_eq!(summary.cycles, n, "budget {n}");
        assert_eq!(summary.stop_reason, StopReason::BudgetReached);
        assert_eq!(u64::from(log.reads), n, "budget {n}: reads");
        assert_eq!(log.command_writes().len() as u64, n, "budget {n}: writes");
        assert_eq!(u64::from(pacer.paces), n, "budget {n}: paces");
        assert_eq!(log.last_write(), Some(&[0u8, 0][..]));
        assert_eq!(log.closes, 1);
    }
}

#[test]
fn pacer_receives_configured_period() {
    let (bus, _log) = MockBus::new();
    let ctl = ControlLoop::new(BusSession::new(bus), speeds(1, 1), Some(2), PERIOD);
    let mut pacer = CountingPacer::new();
    ctl.run(&mut pacer, &mut RecordingSink::new());
    assert_eq!(pacer.last_period, Some(PERIOD));
}

#[test]
fn pacer_is_started_once_before_the_first_cycle() {
    let (bus, log) = MockBus::new();
    let ctl = ControlLoop::new(BusSession::new(bus), speeds(1, 1), Some(3), PERIOD);
    let mut pacer = CountingPacer::new();
    ctl.run(&mut pacer, &mut RecordingSink::new());
    assert_eq!(pacer.starts, 1);
    assert_eq!(pacer.paces, 3);
    assert_eq!(log.borrow().reads, 3);
}

// ── Cancellation ──────────────────────────────────────────────

#[test]
fn cancellation_always_ends_with_safety_stop() {
    for k in 1..=25u32 {
        let (bus, log) = MockBus::new();
        let ctl = ControlLoop::new(BusSession::new(bus), speeds(70, 70), None, PERIOD);
        let token = ctl.cancel_token();
        let mut pacer = CountingPacer::cancel_after(k, token);
        let mut sink = RecordingSink::new();

        let summary = ctl.run(&mut pacer, &mut sink);

        let log = log.borrow();
        assert_eq!(summary.stop_reason, StopReason::Cancelled);
        assert_eq!(summary.cycles, u64::from(k));
        assert_eq!(log.last_write(), Some(&[0u8, 0][..]), "cancel after {k}");
        assert!(log.command_writes().iter().all(|w| w == &[70, 70]));
        assert_eq!(log.closes, 1);
    }
}

#[test]
fn cancellation_mid_cycle_finishes_that_cycle_first() {
    let token = CancelToken::new();
    let (bus, log) = MockBus::new();
    // The stop arrives while the 3rd read is in flight.
    let bus = bus.cancel_at_read(3, token.clone());
    let ctl =
        ControlLoop::new(BusSession::new(bus), speeds(10, 20), None, PERIOD).with_cancel(token);

    let summary = ctl.run(&mut CountingPacer::new(), &mut RecordingSink::new());

    let log = log.borrow();
    assert_eq!(summary.cycles, 3);
    assert_eq!(summary.stop_reason, StopReason::Cancelled);
    assert_eq!(log.reads, 3);
    assert_eq!(
        log.writes,
        vec![vec![10, 20], vec![10, 20], vec![10, 20], vec![0, 0]]
    );
}

#[test]
fn cancellation_beats_an_exhausted_budget() {
    let token = CancelToken::new();
    let (bus, _log) = MockBus::new();
    let bus = bus.cancel_at_read(2, token.clone());
    let ctl =
        ControlLoop::new(BusSession::new(bus), speeds(5, 5), Some(2), PERIOD).with_cancel(token);

    let summary = ctl.run(&mut CountingPacer::new(), &mut RecordingSink::new());

    assert_eq!(summary.cycles, 2);
    assert_eq!(summary.stop_reason, StopReason::Cancelled);
}

#[test]
fn cancellation_before_run_sends_only_the_safety_stop() {
    let (bus, log) = MockBus::new();
    let ctl = ControlLoop::new(BusSession::new(bus), speeds(8, 8), None, PERIOD);
    ctl.cancel_token().cancel();

    let summary = ctl.run(&mut CountingPacer::new(), &mut RecordingSink::new());

    let log = log.borrow();
    assert_eq!(summary.cycles, 0);
    assert_eq!(log.reads, 0);
    assert_eq!(log.writes, vec![vec![0, 0]]);
    assert_eq!(log.closes, 1);
}

// ── Transient faults ──────────────────────────────────────────

#[test]
fn short_read_skips_sample_but_keeps_cadence() {
    let (bus, log) = MockBus::new();
    let bus = bus.short_read_on(1);
    let ctl = ControlLoop::new(BusSession::new(bus), speeds(3, 3), Some(3), PERIOD);
    let mut sink = RecordingSink::new();

    let summary = ctl.run(&mut CountingPacer::new(), &mut sink);

    let cycles: Vec<u64> = sink.samples().iter().map(|(c, _)| *c).collect();
    assert_eq!(cycles, vec![0, 2]);
    assert_eq!(summary.read_failures, 1);

    let log = log.borrow();
    assert_eq!(log.reads, 3, "next cycle still reads");
    assert_eq!(log.command_writes().len(), 3, "write still happens on the short-read cycle");
}

#[test]
fn read_and_write_errors_are_reported_not_fatal() {
    let (bus, log) = MockBus::new();
    let bus = bus.fail_read_on(0).fail_write_on(1);
    let ctl = ControlLoop::new(BusSession::new(bus), speeds(4, -4), Some(4), PERIOD);
    let mut sink = RecordingSink::new();

    let summary = ctl.run(&mut CountingPacer::new(), &mut sink);

    assert_eq!(summary.cycles, 4);
    assert_eq!(summary.read_failures, 1);
    assert_eq!(summary.write_failures, 1);
    assert_eq!(sink.count(|e| matches!(e, LoopEvent::ReadFailed { cycle: 0, .. })), 1);
    assert_eq!(sink.count(|e| matches!(e, LoopEvent::WriteFailed { cycle: 1, .. })), 1);
    assert!(summary.safety_stop_delivered);
    assert_eq!(log.borrow().last_write(), Some(&[0u8, 0][..]));
}

#[test]
fn safety_stop_follows_a_failed_command_write() {
    let (bus, log) = MockBus::new();
    // Writes 0 and 1 are commands; fail the last command.
    let bus = bus.fail_write_on(1);
    let ctl = ControlLoop::new(BusSession::new(bus), speeds(9, 9), Some(2), PERIOD);

    let summary = ctl.run(&mut CountingPacer::new(), &mut RecordingSink::new());

    assert!(summary.safety_stop_delivered);
    assert_eq!(log.borrow().writes.len(), 3);
    assert_eq!(log.borrow().last_write(), Some(&[0u8, 0][..]));
}

#[test]
fn failed_safety_stop_still_terminates_cleanly() {
    let (bus, log) = MockBus::new();
    // Budget 2 → writes 0,1 are commands, write 2 is the safety stop.
    let bus = bus.fail_write_on(2);
    let ctl = ControlLoop::new(BusSession::new(bus), speeds(9, 9), Some(2), PERIOD);
    let mut sink = RecordingSink::new();

    let summary = ctl.run(&mut CountingPacer::new(), &mut sink);

    assert!(!summary.safety_stop_delivered);
    assert_eq!(summary.write_failures, 0, "safety stop is not a cycle write");
    assert_eq!(sink.count(|e| matches!(e, LoopEvent::SafetyStop(Some(_)))), 1);
    assert_eq!(log.borrow().closes, 1);
    assert!(matches!(sink.events.last(), Some(LoopEvent::Finished(_))));
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn phases_progress_in_order() {
    let (bus, _log) = MockBus::new();
    let ctl = ControlLoop::new(BusSession::new(bus), speeds(1, 1), Some(1), PERIOD);
    assert_eq!(ctl.phase(), Phase::Idle);
    let mut sink = RecordingSink::new();
    ctl.run(&mut CountingPacer::new(), &mut sink);

    let transitions: Vec<(Phase, Phase)> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            LoopEvent::PhaseChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![
            (Phase::Idle, Phase::Running),
            (Phase::Running, Phase::Stopping),
            (Phase::Stopping, Phase::Terminated),
        ]
    );
}

#[test]
fn dropping_an_idle_loop_closes_without_writing() {
    let (bus, log) = MockBus::new();
    let ctl = ControlLoop::new(BusSession::new(bus), speeds(50, 50), Some(10), PERIOD);
    drop(ctl);
    let log = log.borrow();
    assert_eq!(log.closes, 1);
    assert!(log.writes.is_empty());
    assert_eq!(log.reads, 0);
}

// ── Sensor extremes ──────────────────────────────────────────

#[test]
fn negative_and_extreme_angles_pass_through_the_loop() {
    let (bus, _log) = MockBus::new();
    // roll -0.01, pitch i16::MIN, yaw i16::MAX
    let bus = bus.with_sensor([0xFF, 0xFF, 0x00, 0x80, 0xFF, 0x7F]);
    let ctl = ControlLoop::new(BusSession::new(bus), speeds(-127, 127), Some(2), PERIOD);
    let mut sink = RecordingSink::new();

    ctl.run(&mut CountingPacer::new(), &mut sink);

    let samples = sink.samples();
    assert_eq!(samples.len(), 2);
    for (_, frame) in &samples {
        assert_eq!(*frame, SensorFrame::new(-1, i16::MIN, i16::MAX));
        assert_eq!(frame.to_string(), "Roll=-0.01 Pitch=-327.68 Yaw=327.67");
    }
}

// ── End-to-end ────────────────────────────────────────────────

#[test]
fn end_to_end_single_speed_until_cancelled() {
    let command = CommandSpec::from_args(&["30"]).unwrap();
    assert_eq!(command, CommandSpec::new(30, 30, 1).unwrap());

    let (bus, log) = MockBus::new();
    let ctl = ControlLoop::new(BusSession::new(bus), command, None, PERIOD);
    let mut pacer = CountingPacer::cancel_after(5, ctl.cancel_token());
    let mut sink = RecordingSink::new();

    ctl.run(&mut pacer, &mut sink);

    let samples = sink.samples();
    assert_eq!(samples.len(), 5);
    for (_, frame) in &samples {
        assert_eq!(*frame, SensorFrame::new(100, 200, 300));
        assert_eq!(frame.to_string(), "Roll=1.00 Pitch=2.00 Yaw=3.00");
    }

    let log = log.borrow();
    assert!(log.command_writes().iter().all(|w| w == &[30, 30]));
    assert_eq!(log.command_writes().len(), 5);
    assert_eq!(log.last_write(), Some(&[0u8, 0][..]));
}
