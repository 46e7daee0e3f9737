//! Clock tree and pin assignment.
//!
//! | Function        | Pin          |
//! |-----------------|--------------|
//! | HC-SR04 TRIG    | PB0          |
//! | HC-SR04 ECHO    | PB1 (EXTI1)  |
//! | Switch 1        | PA4 (EXTI4)  |
//! | Switch 2        | PA5 (EXTI5)  |
//! | LED 1..3        | PB12..PB14   |
//! | LCD BCD D1..D4  | PC0..PC3     |
//! | LCD SEL1..SEL3  | PC4..PC6     |
//! | PC link TX/RX   | PA2 / PA3    |

use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{AnyPin, Input, Level, Output, Pin, Pull, Speed};
use embassy_stm32::peripherals::{DMA1_CH5, DMA1_CH6, PA2, PA3, PA4, PA5, PB1, USART2};
use embassy_stm32::rcc::*;
use embassy_stm32::time::Hertz as TimeHertz;
use embassy_stm32::Config;

/// USART2 and its DMA streams, handed over whole since `Uart::new` needs the
/// interrupt binding from `main`.
pub struct SerialParts {
    pub usart: USART2,
    pub tx: PA2,
    pub rx: PA3,
    pub tx_dma: DMA1_CH6,
    pub rx_dma: DMA1_CH5,
}

pub struct Board {
    pub trigger: Output<'static, AnyPin>,
    pub echo: ExtiInput<'static, PB1>,
    pub switch_1: ExtiInput<'static, PA4>,
    pub switch_2: ExtiInput<'static, PA5>,
    pub leds: [Output<'static, AnyPin>; 3],
    pub lcd_bcd: [Output<'static, AnyPin>; 4],
    pub lcd_select: [Output<'static, AnyPin>; 3],
    pub serial: SerialParts,
}

impl Board {
    pub fn init() -> Self {
        let mut config = Config::default();
        config.rcc.hse = Some(Hse {
            freq: TimeHertz(8_000_000),
            mode: HseMode::Oscillator,
        });
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL168,
            divp: Some(PllPDiv::DIV2), // 168 MHz
            divq: None,
            divr: None,
        });
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV4;
        config.rcc.apb2_pre = APBPrescaler::DIV2;

        let p = embassy_stm32::init(config);

        let out = |pin: AnyPin| Output::new(pin, Level::Low, Speed::Low);

        Self {
            trigger: Output::new(p.PB0.degrade(), Level::Low, Speed::VeryHigh),
            echo: ExtiInput::new(Input::new(p.PB1, Pull::Down), p.EXTI1),
            switch_1: ExtiInput::new(Input::new(p.PA4, Pull::Up), p.EXTI4),
            switch_2: ExtiInput::new(Input::new(p.PA5, Pull::Up), p.EXTI5),
            leds: [out(p.PB12.degrade()), out(p.PB13.degrade()), out(p.PB14.degrade())],
            lcd_bcd: [
                out(p.PC0.degrade()),
                out(p.PC1.degrade()),
                out(p.PC2.degrade()),
                out(p.PC3.degrade()),
            ],
            lcd_select: [out(p.PC4.degrade()), out(p.PC5.degrade()), out(p.PC6.degrade())],
            serial: SerialParts {
                usart: p.USART2,
                tx: p.PA2,
                rx: p.PA3,
                tx_dma: p.DMA1_CH6,
                rx_dma: p.DMA1_CH5,
            },
        }
    }
}
