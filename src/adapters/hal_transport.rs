//! `embedded-hal` I2C adapter.
//!
//! Turns any [`embedded_hal::i2c::I2c`] bus plus a 7-bit device address
//! into a [`BusTransport`].  On Linux the bus is
//! `linux_embedded_hal::I2cdev`; tests use an in-memory bus.
//!
//! `embedded-hal` transfers are all-or-nothing: a read either fills the
//! buffer or returns an error, so successful calls report the full length.

use embedded_hal::i2c::I2c;

use crate::app::ports::BusTransport;

pub struct HalTransport<I> {
    /// `None` once closed; dropping the bus releases the file descriptor.
    i2c: Option<I>,
    address: u8,
}

impl<I: I2c> HalTransport<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self {
            i2c: Some(i2c),
            address,
        }
    }
}

impl<I: I2c> BusTransport for HalTransport<I> {
    type Error = I::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let Some(i2c) = self.i2c.as_mut() else {
            return Ok(0);
        };
        i2c.read(self.address, buf)?;
        Ok(buf.len())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        let Some(i2c) = self.i2c.as_mut() else {
            return Ok(0);
        };
        i2c.write(self.address, bytes)?;
        Ok(bytes.len())
    }

    fn close(&mut self) {
        self.i2c = None;
    }
}
