//! Ultrasonic range monitor core.
//!
//! Timer A wakes the sampling task, timer B wakes the display task, and a
//! free-running task reports the last sample over serial. Switch edges and
//! serial command bytes flip the mode flags in `SharedState`.
//!
//! Everything here is hardware-independent; the firmware binary supplies the
//! sensor, display, indicator and serial collaborators.
#![cfg_attr(not(test), no_std)]

// must come first so the logging macros are visible below
mod fmt;

pub mod config;
pub mod error;
pub mod signal;
pub mod state;
pub mod tasks;
pub mod timer;

pub use error::{Error, Result};
pub use signal::WakeSignal;
pub use state::{OperatingFlags, SharedState};
pub use tasks::display::{DisplayTask, Indicator, Indicators, NumericDisplay, Refresh, Tier};
pub use tasks::input::{Command, InputController, Switch};
pub use tasks::report::{format_report, ReportTask, SerialOut};
pub use tasks::sampling::{RangeSensor, SamplingTask};
pub use timer::{PeriodicTimer, TimerConfig, TimerId, TimerService};
