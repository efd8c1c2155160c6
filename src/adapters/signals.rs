//! OS signal → cancellation bridge.
//!
//! `signal-hook` installs SIGINT/SIGTERM handlers whose only work is one
//! atomic store into the token's flag: no I/O, no allocation, no locks.
//! The control loop notices on its next cycle boundary.

use std::io;

use log::info;
use signal_hook::consts::{SIGINT, SIGTERM};

use crate::control::cancel::CancelToken;

/// Clear `token` when the process receives SIGINT or SIGTERM.
pub fn cancel_on_signals(token: &CancelToken) -> io::Result<()> {
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, token.stop_flag())?;
    }
    info!("Ctrl-C to quit");
    Ok(())
}
