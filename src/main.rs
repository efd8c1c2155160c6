//! thrustlink — main entry point.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                  │
//! │                                                         │
//! │  HalTransport<I2cdev>  LogReportSink  ThreadPacer       │
//! │  (BusTransport)        (ReportSink)   (Pacer)           │
//! │  JsonConfigFile        signal-hook → CancelToken        │
//! │                                                         │
//! │  ───────────────── Port Trait Boundary ───────────────  │
//! │                                                         │
//! │   ┌───────────────────────────────────────────────┐     │
//! │   │  ControlLoop: BusSession · codec · LoopState  │     │
//! │   └───────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit status is 0 after the safety stop, 1 on any startup failure.
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use thrustlink::adapters::config_file::JsonConfigFile;
use thrustlink::adapters::log_sink::LogReportSink;
use thrustlink::adapters::signals::cancel_on_signals;
use thrustlink::adapters::time::ThreadPacer;
use thrustlink::app::commands::{usage, wants_usage};
use thrustlink::app::startup::{Prepared, prepare};
use thrustlink::bus::BusSession;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("thrustlink v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Arguments (fatal before any bus I/O) ──────────────
    let args: Vec<String> = std::env::args().collect();
    let prog = args.first().map_or("thrustlink", String::as_str);
    let positional = args.get(1..).unwrap_or_default();
    if wants_usage(positional.len()) {
        println!("{}", usage(prog));
    }

    // ── 3. Config + bus ───────────────────────────────────────
    let Prepared { control, config } =
        prepare(positional, &JsonConfigFile::from_env(), |config| {
            BusSession::open(&config.bus_path, config.device_address)
        })?;

    // ── 4. Control loop ───────────────────────────────────────
    cancel_on_signals(&control.cancel_token())?;

    let mut pacer = ThreadPacer::new(config.pacing);
    let mut sink = LogReportSink::new();
    let summary = control.run(&mut pacer, &mut sink);

    if !summary.safety_stop_delivered {
        warn!("safety stop was not acknowledged by the bus");
    }
    Ok(())
}
