//! Bus session — exclusive owner of the connection to the remote
//! microcontroller.
//!
//! Wraps a [`BusTransport`] and enforces the frame-size contract: a read
//! is only good if it delivered exactly [`SENSOR_FRAME_LEN`] bytes, a
//! write only if the transport took exactly [`ACTUATOR_FRAME_LEN`].
//!
//! ## Close contract
//!
//! [`close`](BusSession::close) is idempotent and also runs on drop, so
//! the transport is released exactly once on every exit path after a
//! successful open.

use embedded_hal::i2c::Error as _;
use log::{debug, info};

use crate::app::ports::BusTransport;
use crate::codec::{ACTUATOR_FRAME_LEN, SENSOR_FRAME_LEN};
use crate::error::{BusFault, ReadError, WriteError};

pub struct BusSession<T: BusTransport> {
    transport: T,
    open: bool,
}

impl<T: BusTransport> BusSession<T> {
    /// Take ownership of an already-opened transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            open: true,
        }
    }

    /// Read one raw sensor frame.
    pub fn read_sensor(&mut self) -> Result<[u8; SENSOR_FRAME_LEN], ReadError> {
        if !self.open {
            return Err(ReadError(BusFault::Closed));
        }
        let mut buf = [0u8; SENSOR_FRAME_LEN];
        let n = self
            .transport
            .read(&mut buf)
            .map_err(|e| ReadError(BusFault::Transport(e.kind())))?;
        if n != SENSOR_FRAME_LEN {
            return Err(ReadError(BusFault::Length {
                expected: SENSOR_FRAME_LEN,
                actual: n,
            }));
        }
        Ok(buf)
    }

    /// Write one raw actuator frame.
    pub fn write_actuator(&mut self, bytes: &[u8; ACTUATOR_FRAME_LEN]) -> Result<(), WriteError> {
        if !self.open {
            return Err(WriteError(BusFault::Closed));
        }
        let n = self
            .transport
            .write(bytes)
            .map_err(|e| WriteError(BusFault::Transport(e.kind())))?;
        if n != ACTUATOR_FRAME_LEN {
            return Err(WriteError(BusFault::Length {
                expected: ACTUATOR_FRAME_LEN,
                actual: n,
            }));
        }
        Ok(())
    }

    /// Release the bus.  Safe to call more than once.
    pub fn close(&mut self) {
        if self.open {
            self.transport.close();
            self.open = false;
            info!("bus closed");
        } else {
            debug!("bus already closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Borrow the transport (tests inspect mock state through this).
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: BusTransport> Drop for BusSession<T> {
    fn drop(&mut self) {
        self.close();
    }
}

// ── Linux bus ─────────────────────────────────────────────────

#[cfg(feature = "linux")]
mod linux {
    use linux_embedded_hal::I2cdev;
    use log::info;

    use super::BusSession;
    use crate::adapters::hal_transport::HalTransport;
    use crate::error::StartupError;

    impl BusSession<HalTransport<I2cdev>> {
        /// Open `/dev/i2c-N` and bind it to the 7-bit `address`.
        pub fn open(bus_path: &str, address: u8) -> Result<Self, StartupError> {
            let dev = I2cdev::new(bus_path).map_err(|e| StartupError::BusUnavailable {
                bus: bus_path.to_owned(),
                reason: e.to_string(),
            })?;
            info!("bus {bus_path} opened, device 0x{address:02X}");
            Ok(Self::new(HalTransport::new(dev, address)))
        }
    }
}
