//! Unified error types for thrustlink.
//!
//! Two families, matching the two ways things go wrong:
//!
//! - [`StartupError`] — fatal, raised strictly before the control loop
//!   runs (bad arguments, bad config, bus unavailable).
//! - [`ReadError`] / [`WriteError`] — transient bus faults inside a cycle.
//!   Reported, never fatal.
//!
//! Library functions return these directly; the binary wraps startup
//! failures in `anyhow` at its boundary.

use core::fmt;

use embedded_hal::i2c::ErrorKind;

// ---------------------------------------------------------------------------
// Startup errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    /// The bus device could not be opened.
    BusUnavailable { bus: String, reason: String },
    /// A positional argument could not be parsed.
    Args(ParseError),
    /// The configuration file is missing, malformed, or out of range.
    Config(ConfigError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusUnavailable { bus, reason } => write!(f, "bus {bus} unavailable: {reason}"),
            Self::Args(e) => write!(f, "{e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<ParseError> for StartupError {
    fn from(e: ParseError) -> Self {
        Self::Args(e)
    }
}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Argument parse errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token is not a base-10 integer.
    NotANumber(String),
    /// The speed lies outside -127..=127.  Integers too large for `i64`
    /// saturate to `i64::MIN` / `i64::MAX`.
    OutOfRange(i64),
    /// The duration multiplier is not a non-negative integer.
    InvalidMultiplier(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(tok) => write!(f, "speed '{tok}' is not an integer"),
            Self::OutOfRange(v) => write!(f, "speed {v} out of range (-127..127)"),
            Self::InvalidMultiplier(tok) => {
                write!(f, "duration multiplier '{tok}' is not a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors from [`ConfigPort`](crate::app::ports::ConfigPort) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(String),
    /// The file is not valid JSON for `SystemConfig`.
    Malformed(String),
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed: {msg}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Bus faults (transient)
// ---------------------------------------------------------------------------

/// What went wrong on a single bus transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusFault {
    /// The transport moved a different number of bytes than the frame needs.
    Length { expected: usize, actual: usize },
    /// The transport reported an error.
    Transport(ErrorKind),
    /// The session was already closed.
    Closed,
}

impl fmt::Display for BusFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { expected, actual } => {
                write!(f, "transferred {actual} of {expected} bytes")
            }
            Self::Transport(kind) => write!(f, "transport error: {kind}"),
            Self::Closed => write!(f, "bus closed"),
        }
    }
}

/// A sensor frame could not be read in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadError(pub BusFault);

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I2C read error: {}", self.0)
    }
}

/// An actuator frame could not be written in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteError(pub BusFault);

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I2C write error: {}", self.0)
    }
}
