//! Startup command: which speeds to drive and for how long.
//!
//! Positional arguments, all optional:
//!
//! | args                       | result                                  |
//! |----------------------------|-----------------------------------------|
//! | none                       | `(50, -50, 1)`                          |
//! | `speed`                    | `(speed, speed, 1)`                     |
//! | `left right`               | `(left, right, 1)`                      |
//! | `left right mult [...]`    | `(left, right, mult)` + usage printed   |
//!
//! The last row prints the usage text even though the arguments are
//! accepted, and even when they then fail to parse.

use crate::codec::{ActuatorFrame, parse_multiplier, parse_speed};
use crate::error::ParseError;

/// Usage banner.  `{prog}` is replaced with the program name.
pub const USAGE: &str = "Usage: {prog} [left] [right] [multiplier]\n       \
                         Speeds are signed bytes (-127..127)";

/// Default drive: left forward, right reverse (spin in place).
const DEFAULT_FRAME: ActuatorFrame = match ActuatorFrame::new(50, -50) {
    Some(frame) => frame,
    None => panic!("default speeds must be in range"),
};

/// Speed pair plus run length, fixed at startup.
///
/// The speeds are held as an [`ActuatorFrame`], so a command can only be
/// built from in-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    frame: ActuatorFrame,
    /// Run length in units of `cycles_per_unit`; `0` runs until cancelled.
    duration_multiplier: u32,
}

impl Default for CommandSpec {
    fn default() -> Self {
        Self {
            frame: DEFAULT_FRAME,
            duration_multiplier: 1,
        }
    }
}

impl CommandSpec {
    /// `None` if either speed is `i8::MIN`.
    pub fn new(left: i8, right: i8, duration_multiplier: u32) -> Option<Self> {
        ActuatorFrame::new(left, right).map(|frame| Self {
            frame,
            duration_multiplier,
        })
    }

    /// Interpret positional arguments (program name already stripped).
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ParseError> {
        let (left, right, duration_multiplier) = match args {
            [] => return Ok(Self::default()),
            [speed] => {
                let speed = parse_speed(speed.as_ref())?;
                (speed, speed, 1)
            }
            [left, right] => (parse_speed(left.as_ref())?, parse_speed(right.as_ref())?, 1),
            [left, right, multiplier, ..] => (
                parse_speed(left.as_ref())?,
                parse_speed(right.as_ref())?,
                parse_multiplier(multiplier.as_ref())?,
            ),
        };

        // parse_speed already excludes i8::MIN.
        Self::new(left, right, duration_multiplier)
            .ok_or(ParseError::OutOfRange(i64::from(i8::MIN)))
    }

    pub fn left(&self) -> i8 {
        self.frame.left()
    }

    pub fn right(&self) -> i8 {
        self.frame.right()
    }

    pub fn duration_multiplier(&self) -> u32 {
        self.duration_multiplier
    }

    /// The frame written every cycle.
    pub fn actuator_frame(&self) -> ActuatorFrame {
        self.frame
    }

    /// Number of cycles to run, or `None` for "until cancelled".
    pub fn cycle_budget(&self, cycles_per_unit: u32) -> Option<u64> {
        match self.duration_multiplier {
            0 => None,
            m => Some(u64::from(m) * u64::from(cycles_per_unit)),
        }
    }
}

/// Whether this many positional arguments triggers the usage banner.
/// Checked before parsing: the banner prints even if parsing then fails.
pub fn wants_usage(arg_count: usize) -> bool {
    arg_count >= 3
}

/// Render [`USAGE`] for `prog`.
pub fn usage(prog: &str) -> String {
    USAGE.replace("{prog}", prog)
}
