use crate::config::{TIER_1_CM, TIER_2_CM, TIER_3_CM};
use crate::signal::WakeSignal;
use crate::state::SharedState;

// ── Collaborators ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    One,
    Two,
    Three,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [Indicator::One, Indicator::Two, Indicator::Three];
}

/// Three independent binary outputs.
pub trait Indicators {
    fn set(&mut self, id: Indicator, on: bool);

    fn set_all(&mut self, pattern: [bool; 3]) {
        for (id, on) in Indicator::ALL.into_iter().zip(pattern) {
            self.set(id, on);
        }
    }

    fn all_off(&mut self) {
        self.set_all([false; 3]);
    }
}

/// Numeric display. Both calls are idempotent; a display that is not
/// written keeps showing its last value.
pub trait NumericDisplay {
    fn write(&mut self, value: u32);
    fn blank(&mut self);
}

// ── Tier policy ───────────────────────────────────────────────────────────────

/// Output band for a distance. The bands are half-open, so a boundary value
/// belongs to the band above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tier {
    /// d < 10
    Near,
    /// 10 <= d < 20
    Close,
    /// 20 <= d < 30
    Mid,
    /// d >= 30
    Far,
}

impl Tier {
    pub const fn from_distance(cm: u32) -> Self {
        if cm < TIER_1_CM {
            Tier::Near
        } else if cm < TIER_2_CM {
            Tier::Close
        } else if cm < TIER_3_CM {
            Tier::Mid
        } else {
            Tier::Far
        }
    }

    /// Indicator pattern, indicator one first.
    pub const fn indicators(self) -> [bool; 3] {
        match self {
            Tier::Near => [false, false, false],
            Tier::Close => [true, false, false],
            Tier::Mid => [true, true, false],
            Tier::Far => [true, true, true],
        }
    }
}

// ── Task ──────────────────────────────────────────────────────────────────────

/// What one display cycle did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Refresh {
    /// Measurement disabled: display blanked, indicators off.
    Blanked,
    /// Indicators updated, display left untouched.
    Held(Tier),
    /// Indicators updated and the distance written.
    Shown(Tier, u32),
}

/// Display/actuation task: woken by timer B.
pub struct DisplayTask<'a, D, L> {
    state: &'a SharedState,
    wake: &'a WakeSignal,
    display: D,
    indicators: L,
}

impl<'a, D, L> DisplayTask<'a, D, L>
where
    D: NumericDisplay,
    L: Indicators,
{
    pub fn new(state: &'a SharedState, wake: &'a WakeSignal, display: D, indicators: L) -> Self {
        Self {
            state,
            wake,
            display,
            indicators,
        }
    }

    /// One refresh from the current shared state.
    ///
    /// Disabled measurement wins over hold. Hold freezes the number only;
    /// the indicator tier always follows the latest sample.
    pub fn cycle(&mut self) -> Refresh {
        let flags = self.state.flags();
        if !flags.measurement_enabled {
            self.display.blank();
            self.indicators.all_off();
            return Refresh::Blanked;
        }

        let cm = self.state.last_distance();
        let tier = Tier::from_distance(cm);
        self.indicators.set_all(tier.indicators());

        if flags.hold_display {
            Refresh::Held(tier)
        } else {
            self.display.write(cm);
            Refresh::Shown(tier, cm)
        }
    }

    pub async fn step(&mut self) -> Refresh {
        self.wake.wait().await;
        self.cycle()
    }

    pub async fn run(mut self) -> ! {
        loop {
            self.step().await;
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn indicators(&self) -> &L {
        &self.indicators
    }
}
