//! Build-time configuration. Nothing here is adjustable at runtime.

use embassy_time::Duration;

use crate::tasks::input::Switch;

// ── Periods ───────────────────────────────────────────────────────────────────

/// Timer A: ranging sample trigger.
pub const SAMPLE_PERIOD: Duration = Duration::from_millis(500);
/// Timer B: display/indicator refresh trigger.
pub const DISPLAY_PERIOD: Duration = Duration::from_millis(1000);
/// Serial report interval, independent of both timers.
pub const REPORT_PERIOD: Duration = Duration::from_millis(1000);

// ── Serial link ───────────────────────────────────────────────────────────────

pub const SERIAL_BAUD: u32 = 9600;
pub const CMD_TOGGLE_MEASUREMENT: u8 = b'o';
pub const CMD_TOGGLE_HOLD: u8 = b'h';

// ── Tier thresholds (cm, lower bound of each band) ───────────────────────────

pub const TIER_1_CM: u32 = 10;
pub const TIER_2_CM: u32 = 20;
pub const TIER_3_CM: u32 = 30;

// ── Switch map ────────────────────────────────────────────────────────────────

pub const SWITCH_MEASUREMENT: Switch = Switch::One;
pub const SWITCH_HOLD: Switch = Switch::Two;

/// Largest value the 3-digit display can show; larger values saturate.
pub const DISPLAY_MAX: u32 = 999;
