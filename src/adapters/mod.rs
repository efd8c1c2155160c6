//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter         | Implements    | Connects to                  |
//! |-----------------|---------------|------------------------------|
//! | `hal_transport` | BusTransport  | any `embedded-hal` I2C bus   |
//! | `log_sink`      | ReportSink    | `log` facade                 |
//! | `time`          | Pacer         | `std::thread::sleep`         |
//! | `config_file`   | ConfigPort    | JSON file on disk            |
//! | `signals`       | —             | SIGINT/SIGTERM → CancelToken |

pub mod config_file;
pub mod hal_transport;
pub mod log_sink;
#[cfg(unix)]
pub mod signals;
pub mod time;
