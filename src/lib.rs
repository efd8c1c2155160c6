//! thrustlink library.
//!
//! Fixed-rate control loop for a two-thruster vehicle whose IMU and motor
//! driver sit behind one I2C microcontroller.  Exposes the pure-logic
//! modules for integration testing; everything Linux-specific is behind
//! the `linux` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod bus;
pub mod codec;
pub mod config;
pub mod control;
pub mod error;
