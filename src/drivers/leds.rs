use embassy_stm32::gpio::{AnyPin, Output};
use range_monitor::{Indicator, Indicators};

/// Three active-high LEDs, indicator one first.
pub struct Leds {
    pins: [Output<'static, AnyPin>; 3],
}

impl Leds {
    pub fn new(pins: [Output<'static, AnyPin>; 3]) -> Self {
        Self { pins }
    }
}

impl Indicators for Leds {
    fn set(&mut self, id: Indicator, on: bool) {
        let pin = match id {
            Indicator::One => &mut self.pins[0],
            Indicator::Two => &mut self.pins[1],
            Indicator::Three => &mut self.pins[2],
        };
        if on {
            pin.set_high();
        } else {
            pin.set_low();
        }
    }
}
