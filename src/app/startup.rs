//! Startup sequence: arguments → config → bus → control loop.
//!
//! Every step here is fatal on failure, and the order is fixed so that
//! bad arguments or bad config are rejected before the bus is touched.
//! The bus opener is injected, which lets tests observe that it was
//! never called.

use log::info;

use crate::bus::BusSession;
use crate::config::SystemConfig;
use crate::control::ControlLoop;
use crate::error::StartupError;

use super::commands::CommandSpec;
use super::ports::{BusTransport, ConfigPort};

/// A loop ready to run, plus the config it was built from.
pub struct Prepared<T: BusTransport> {
    pub control: ControlLoop<T>,
    pub config: SystemConfig,
}

/// Build a [`ControlLoop`] from positional arguments (program name
/// stripped), a config source, and a bus opener.
pub fn prepare<S, T, F>(
    args: &[S],
    config_port: &impl ConfigPort,
    open_bus: F,
) -> Result<Prepared<T>, StartupError>
where
    S: AsRef<str>,
    T: BusTransport,
    F: FnOnce(&SystemConfig) -> Result<BusSession<T>, StartupError>,
{
    let command = CommandSpec::from_args(args)?;
    let config = config_port.load()?;
    let cycle_budget = command.cycle_budget(config.cycles_per_unit);

    let bus = open_bus(&config)?;
    info!(
        "command left={} right={} budget={:?} period={}ms",
        command.left(), command.right(), cycle_budget, config.period_ms
    );

    Ok(Prepared {
        control: ControlLoop::new(bus, command, cycle_budget, config.period()),
        config,
    })
}
