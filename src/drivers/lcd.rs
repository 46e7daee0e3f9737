use cortex_m::asm;
use embassy_stm32::gpio::{AnyPin, Output};
use range_monitor::config::DISPLAY_MAX;
use range_monitor::NumericDisplay;

/// BCD code the segment decoders treat as "all segments off".
const BCD_BLANK: u8 = 0x0F;
/// Latch pulse width, ~1 us at 168 MHz.
const LATCH_CYCLES: u32 = 168;

/// 3-digit 7-segment LCD behind per-digit BCD latch/decoders.
///
/// The four BCD lines are shared; each digit latches them on a pulse of its
/// own select line. Digits hold their value until latched again, so no
/// refresh is needed.
pub struct Lcd {
    bcd: [Output<'static, AnyPin>; 4],
    /// Hundreds, tens, units.
    select: [Output<'static, AnyPin>; 3],
}

impl Lcd {
    pub fn new(bcd: [Output<'static, AnyPin>; 4], select: [Output<'static, AnyPin>; 3]) -> Self {
        let mut lcd = Self { bcd, select };
        lcd.blank();
        lcd
    }

    fn latch(&mut self, digit: usize, code: u8) {
        for (bit, line) in self.bcd.iter_mut().enumerate() {
            if code & (1 << bit) != 0 {
                line.set_high();
            } else {
                line.set_low();
            }
        }
        let sel = &mut self.select[digit];
        sel.set_high();
        asm::delay(LATCH_CYCLES);
        sel.set_low();
    }
}

impl NumericDisplay for Lcd {
    fn write(&mut self, value: u32) {
        let value = value.min(DISPLAY_MAX);
        let digits = [value / 100, (value / 10) % 10, value % 10];
        for (i, d) in digits.into_iter().enumerate() {
            self.latch(i, d as u8);
        }
    }

    fn blank(&mut self) {
        for i in 0..self.select.len() {
            self.latch(i, BCD_BLANK);
        }
    }
}
