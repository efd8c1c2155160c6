//! Port traits — the hexagonal boundary between the control loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (bus transport, report sink, pacer, config source)
//! implement these traits.  The [`ControlLoop`](crate::control::ControlLoop)
//! consumes them via generics, so the loop never touches hardware, clocks,
//! or files directly and runs unchanged against mocks on the host.

use core::time::Duration;

use embedded_hal::i2c::Error as HalError;

use crate::config::SystemConfig;
use crate::error::ConfigError;

// ───────────────────────────────────────────────────────────────
// Bus transport port (driven adapter: domain ↔ addressed device)
// ───────────────────────────────────────────────────────────────

/// Raw byte transport to one addressed device.
///
/// Counts are returned rather than assumed so the session can tell a
/// short transfer from a complete one.
pub trait BusTransport {
    /// Transport error.  Any `embedded-hal` I2C error qualifies, which keeps
    /// the fault classification ([`ErrorKind`](embedded_hal::i2c::ErrorKind))
    /// uniform across real and mock buses.
    type Error: HalError;

    /// Read up to `buf.len()` bytes.  Returns how many were read.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `bytes`.  Returns how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error>;

    /// Release the bus.  Called at most once by [`BusSession`](crate::bus::BusSession).
    fn close(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Report sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The loop emits structured [`LoopEvent`](super::events::LoopEvent)s
/// through this port.  Adapters decide where they go.
pub trait ReportSink {
    fn emit(&mut self, event: &super::events::LoopEvent);
}

// ───────────────────────────────────────────────────────────────
// Pacer port (driven adapter: domain → wall clock)
// ───────────────────────────────────────────────────────────────

/// Waits out the remainder of a cycle.  The only place the loop suspends.
pub trait Pacer {
    /// Called once as the loop enters `Running`, before the first cycle.
    fn start(&mut self) {}

    fn pace(&mut self, period: Duration);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ← config source)
// ───────────────────────────────────────────────────────────────

/// Loads system configuration.
///
/// Implementations MUST validate before returning; invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not clamped.
pub trait ConfigPort {
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}
