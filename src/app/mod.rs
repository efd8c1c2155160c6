//! Application boundary — the types that cross between the control loop
//! and its adapters.
//!
//! The loop itself lives in [`crate::control`]; everything it needs from
//! the outside world comes in through the **port traits** in [`ports`],
//! keeping it testable without a real bus.

pub mod commands;
pub mod events;
pub mod ports;
pub mod startup;
