//! Integration tests: startup ordering (args → config → bus).

use std::cell::Cell;
use std::time::Duration;

use thrustlink::adapters::config_file::JsonConfigFile;
use thrustlink::app::ports::ConfigPort;
use thrustlink::app::startup::prepare;
use thrustlink::bus::BusSession;
use thrustlink::config::SystemConfig;
use thrustlink::control::state::Phase;
use thrustlink::error::{ConfigError, ParseError, StartupError};

use super::mock_bus::{CountingPacer, MockBus, RecordingSink};

struct FixedConfig(Result<SystemConfig, ConfigError>);

impl ConfigPort for FixedConfig {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        self.0.clone()
    }
}

fn defaults() -> FixedConfig {
    FixedConfig(Ok(SystemConfig::default()))
}

#[test]
fn bad_speed_is_rejected_before_the_bus_is_opened() {
    let opened = Cell::new(false);
    let result = prepare(&["200"], &defaults(), |_| {
        opened.set(true);
        Ok(BusSession::new(MockBus::new().0))
    });

    assert!(matches!(
        result.err(),
        Some(StartupError::Args(ParseError::OutOfRange(200)))
    ));
    assert!(!opened.get());
}

#[test]
fn bad_multiplier_is_rejected_before_the_bus_is_opened() {
    let opened = Cell::new(false);
    let result = prepare(&["10", "10", "soon"], &defaults(), |_| {
        opened.set(true);
        Ok(BusSession::new(MockBus::new().0))
    });

    assert!(matches!(
        result.err(),
        Some(StartupError::Args(ParseError::InvalidMultiplier(_)))
    ));
    assert!(!opened.get());
}

#[test]
fn config_error_is_fatal_before_the_bus_is_opened() {
    let opened = Cell::new(false);
    let config = FixedConfig(Err(ConfigError::Malformed("expected value".into())));
    let result = prepare::<&str, _, _>(&[], &config, |_| {
        opened.set(true);
        Ok(BusSession::new(MockBus::new().0))
    });

    assert!(matches!(
        result.err(),
        Some(StartupError::Config(ConfigError::Malformed(_)))
    ));
    assert!(!opened.get());
}

#[test]
fn missing_config_file_is_fatal() {
    let config = JsonConfigFile::new(Some("/nonexistent/thrustlink.json".into()));
    let result = prepare::<&str, _, _>(&[], &config, |_| Ok(BusSession::new(MockBus::new().0)));
    assert!(matches!(
        result.err(),
        Some(StartupError::Config(ConfigError::Io(_)))
    ));
}

#[test]
fn bus_open_failure_propagates() {
    let result = prepare::<&str, MockBus, _>(&[], &defaults(), |config| {
        Err(StartupError::BusUnavailable {
            bus: config.bus_path.clone(),
            reason: "No such file or directory".into(),
        })
    });

    match result.err() {
        Some(StartupError::BusUnavailable { bus, .. }) => assert_eq!(bus, "/dev/i2c-1"),
        _ => panic!("expected BusUnavailable"),
    }
}

#[test]
fn opener_sees_the_loaded_config() {
    let config = SystemConfig {
        bus_path: "/dev/i2c-7".into(),
        device_address: 0x2A,
        ..SystemConfig::default()
    };
    let seen = Cell::new(None);
    let prepared = prepare::<&str, _, _>(&[], &FixedConfig(Ok(config)), |config| {
        seen.set(Some(config.device_address));
        Ok(BusSession::new(MockBus::new().0))
    });

    assert!(prepared.is_ok());
    assert_eq!(seen.get(), Some(0x2A));
}

#[test]
fn prepared_loop_runs_one_unit_of_cycles() {
    let (bus, log) = MockBus::new();
    let Ok(prepared) = prepare(&["25", "-25", "1"], &defaults(), move |_| {
        Ok(BusSession::new(bus))
    }) else {
        panic!("startup failed");
    };

    assert_eq!(prepared.config.period(), Duration::from_millis(10));
    assert_eq!(prepared.control.phase(), Phase::Idle);

    let summary = prepared
        .control
        .run(&mut CountingPacer::new(), &mut RecordingSink::new());

    assert_eq!(summary.cycles, 100);
    let log = log.borrow();
    assert_eq!(log.command_writes().len(), 100);
    assert!(log.command_writes().iter().all(|w| w == &[25, 0xE7]));
    assert_eq!(log.last_write(), Some(&[0u8, 0][..]));
}

#[test]
fn cycles_per_unit_scales_the_budget() {
    let config = SystemConfig {
        cycles_per_unit: 4,
        ..SystemConfig::default()
    };
    let (bus, log) = MockBus::new();
    let Ok(prepared) = prepare(&["1", "1", "3"], &FixedConfig(Ok(config)), move |_| {
        Ok(BusSession::new(bus))
    }) else {
        panic!("startup failed");
    };

    let summary = prepared
        .control
        .run(&mut CountingPacer::new(), &mut RecordingSink::new());

    assert_eq!(summary.cycles, 12);
    assert_eq!(log.borrow().reads, 12);
}
