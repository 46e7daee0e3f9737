//! Shared state between the timer-driven tasks and the input handlers.
//!
//! Every field is a single machine word behind its own atomic. Readers get
//! each field whole (no tearing), but two fields read back to back are not a
//! consistent snapshot: a toggle landing between the two loads shows up one
//! cycle late, which the display and sampling tasks tolerate.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

// ── Data types ────────────────────────────────────────────────────────────────

/// Copy of the two mode flags, as read by a task at the start of its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OperatingFlags {
    pub measurement_enabled: bool,
    pub hold_display: bool,
}

impl Default for OperatingFlags {
    fn default() -> Self {
        Self {
            measurement_enabled: true,
            hold_display: false,
        }
    }
}

/// Process-wide monitor state. Lives for the whole program, usually in a
/// `StaticCell`, and is handed to every task and handler by `&'static` ref.
pub struct SharedState {
    measurement_enabled: AtomicBool,
    hold_display: AtomicBool,
    /// Written only by the sampling task.
    last_distance: AtomicU32,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            measurement_enabled: AtomicBool::new(true),
            hold_display: AtomicBool::new(false),
            last_distance: AtomicU32::new(0),
        }
    }

    pub fn flags(&self) -> OperatingFlags {
        OperatingFlags {
            measurement_enabled: self.measurement_enabled(),
            hold_display: self.hold_display(),
        }
    }

    pub fn measurement_enabled(&self) -> bool {
        self.measurement_enabled.load(Ordering::Relaxed)
    }

    pub fn hold_display(&self) -> bool {
        self.hold_display.load(Ordering::Relaxed)
    }

    /// Flips `measurement_enabled` and returns the new value.
    pub fn toggle_measurement(&self) -> bool {
        // fetch_xor returns the previous value
        !self.measurement_enabled.fetch_xor(true, Ordering::Relaxed)
    }

    /// Flips `hold_display` and returns the new value.
    pub fn toggle_hold(&self) -> bool {
        !self.hold_display.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn last_distance(&self) -> u32 {
        self.last_distance.load(Ordering::Relaxed)
    }

    pub fn store_distance(&self, cm: u32) {
        self.last_distance.store(cm, Ordering::Relaxed);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_enabled_not_held_at_zero() {
        let state = SharedState::new();
        assert_eq!(state.flags(), OperatingFlags::default());
        assert_eq!(state.last_distance(), 0);
    }

    #[test]
    fn toggles_report_new_value() {
        let state = SharedState::new();
        assert!(!state.toggle_measurement());
        assert!(!state.measurement_enabled());
        assert!(state.toggle_measurement());

        assert!(state.toggle_hold());
        assert!(state.hold_display());
        assert!(!state.toggle_hold());
    }

    #[test]
    fn hold_without_measurement_is_representable() {
        let state = SharedState::new();
        state.toggle_measurement();
        state.toggle_hold();
        assert_eq!(
            state.flags(),
            OperatingFlags {
                measurement_enabled: false,
                hold_display: true,
            }
        );
    }

    #[test]
    fn concurrent_toggles_are_not_lost() {
        use std::sync::Arc;

        let state = Arc::new(SharedState::new());
        let handles: std::vec::Vec<_> = (0..4)
            .map(|_| {
                let state = state.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        state.toggle_hold();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        // 4000 flips: back where it started
        assert!(!state.hold_display());
    }

    #[test]
    fn stores_saturation_values_verbatim() {
        let state = SharedState::new();
        state.store_distance(u32::MAX);
        assert_eq!(state.last_distance(), u32::MAX);
    }
}
