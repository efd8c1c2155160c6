//! Frame codec for the two fixed-size frames exchanged with the remote
//! microcontroller.
//!
//! Wire formats:
//! ```text
//! Sensor frame (device → host), 6 bytes:
//! ┌───────────┬───────────┬───────────┐
//! │ roll  i16 │ pitch i16 │ yaw   i16 │   little-endian, value × 100
//! └───────────┴───────────┴───────────┘
//!
//! Actuator frame (host → device), 2 bytes:
//! ┌─────────┬──────────┐
//! │ left i8 │ right i8 │   -127..=127
//! └─────────┴──────────┘
//! ```
//!
//! Everything here is pure: no I/O, no state.

use core::fmt;
use core::num::{IntErrorKind, ParseIntError};

use crate::error::ParseError;

/// Sensor frame size on the wire.
pub const SENSOR_FRAME_LEN: usize = 6;

/// Actuator frame size on the wire.
pub const ACTUATOR_FRAME_LEN: usize = 2;

/// Fixed-point scale of the orientation fields.
pub const ANGLE_SCALE: f32 = 100.0;

/// Largest speed magnitude the firmware accepts.
pub const MAX_SPEED: i8 = 127;

// ---------------------------------------------------------------------------
// SensorFrame
// ---------------------------------------------------------------------------

/// One orientation sample, fixed-point scaled by 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorFrame {
    pub roll: i16,
    pub pitch: i16,
    pub yaw: i16,
}

impl SensorFrame {
    pub const fn new(roll: i16, pitch: i16, yaw: i16) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Roll in degrees.
    pub fn roll_deg(&self) -> f32 {
        self.roll as f32 / ANGLE_SCALE
    }

    /// Pitch in degrees.
    pub fn pitch_deg(&self) -> f32 {
        self.pitch as f32 / ANGLE_SCALE
    }

    /// Yaw in degrees.
    pub fn yaw_deg(&self) -> f32 {
        self.yaw as f32 / ANGLE_SCALE
    }
}

impl fmt::Display for SensorFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Roll={:.2} Pitch={:.2} Yaw={:.2}",
            self.roll_deg(),
            self.pitch_deg(),
            self.yaw_deg()
        )
    }
}

// ---------------------------------------------------------------------------
// ActuatorFrame
// ---------------------------------------------------------------------------

/// Differential-drive speed pair.
///
/// Both sides stay within -127..=127; -128 is representable in an `i8`
/// but the firmware treats it as out of range, so it is never constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorFrame {
    left: i8,
    right: i8,
}

impl ActuatorFrame {
    /// The safety-stop command.
    pub const STOP: Self = Self { left: 0, right: 0 };

    /// Build a frame, rejecting `i8::MIN` on either side.
    pub const fn new(left: i8, right: i8) -> Option<Self> {
        if left == i8::MIN || right == i8::MIN {
            return None;
        }
        Some(Self { left, right })
    }

    pub fn left(&self) -> i8 {
        self.left
    }

    pub fn right(&self) -> i8 {
        self.right
    }

    pub fn is_stop(&self) -> bool {
        *self == Self::STOP
    }
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

/// Decode the 6-byte orientation frame. Any bit pattern is a legal value.
pub fn decode_sensor(bytes: &[u8; SENSOR_FRAME_LEN]) -> SensorFrame {
    SensorFrame {
        roll: i16::from_le_bytes([bytes[0], bytes[1]]),
        pitch: i16::from_le_bytes([bytes[2], bytes[3]]),
        yaw: i16::from_le_bytes([bytes[4], bytes[5]]),
    }
}

/// Decode from an arbitrary slice. Only an exact 6-byte slice yields a frame.
pub fn decode_sensor_slice(bytes: &[u8]) -> Option<SensorFrame> {
    let exact: &[u8; SENSOR_FRAME_LEN] = bytes.try_into().ok()?;
    Some(decode_sensor(exact))
}

/// Encode an orientation frame the way the firmware sends it.
///
/// The host never transmits sensor frames; simulators and tests do.
pub fn encode_sensor(frame: SensorFrame) -> [u8; SENSOR_FRAME_LEN] {
    let mut out = [0u8; SENSOR_FRAME_LEN];
    out[0..2].copy_from_slice(&frame.roll.to_le_bytes());
    out[2..4].copy_from_slice(&frame.pitch.to_le_bytes());
    out[4..6].copy_from_slice(&frame.yaw.to_le_bytes());
    out
}

/// Encode a speed command as two raw signed bytes, left then right.
pub fn encode_actuator(frame: ActuatorFrame) -> [u8; ACTUATOR_FRAME_LEN] {
    [frame.left.to_le_bytes()[0], frame.right.to_le_bytes()[0]]
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

/// Parse a base-10 speed in -127..=127.
///
/// Any integer outside the range is `OutOfRange`, including ones too long
/// for `i64` (reported saturated).
pub fn parse_speed(token: &str) -> Result<i8, ParseError> {
    let trimmed = token.trim();
    let value: i64 = trimmed.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => ParseError::OutOfRange(i64::MAX),
        IntErrorKind::NegOverflow => ParseError::OutOfRange(i64::MIN),
        _ => ParseError::NotANumber(trimmed.to_owned()),
    })?;
    if !(-i64::from(MAX_SPEED)..=i64::from(MAX_SPEED)).contains(&value) {
        return Err(ParseError::OutOfRange(value));
    }
    Ok(value as i8)
}

/// Parse the run-duration multiplier (a non-negative integer).
pub fn parse_multiplier(token: &str) -> Result<u32, ParseError> {
    let trimmed = token.trim();
    trimmed
        .parse()
        .map_err(|_| ParseError::InvalidMultiplier(trimmed.to_owned()))
}
