#![no_std]
#![no_main]

mod board;
mod drivers;

use defmt::{info, unwrap, warn};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::peripherals::{DMA1_CH5, PA4, PA5, PB1, USART2};
use embassy_stm32::usart::{Config as UsartConfig, Uart, UartRx};
use embassy_stm32::{bind_interrupts, peripherals};
use range_monitor::config::{DISPLAY_PERIOD, SAMPLE_PERIOD, SERIAL_BAUD};
use range_monitor::{
    DisplayTask, InputController, PeriodicTimer, ReportTask, SamplingTask, SharedState, Switch,
    TimerId, TimerService, WakeSignal,
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::board::Board;
use crate::drivers::hcsr04::HcSr04;
use crate::drivers::lcd::Lcd;
use crate::drivers::leds::Leds;
use crate::drivers::serial::SerialPort;

// ── Shared state and wake signals ─────────────────────────────────────────────
static STATE: StaticCell<SharedState> = StaticCell::new();
static SAMPLE_WAKE: StaticCell<WakeSignal> = StaticCell::new();
static DISPLAY_WAKE: StaticCell<WakeSignal> = StaticCell::new();

// ── Timer executor ────────────────────────────────────────────────────────────
//  Timer handlers run here, above thread mode, so they preempt the tasks.
//  UART5 is unused on this board and only lends its NVIC line.
static EXECUTOR_TIMERS: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn UART5() {
    EXECUTOR_TIMERS.on_interrupt()
}

// ── Interrupt bindings ────────────────────────────────────────────────────────
bind_interrupts!(struct Irqs {
    USART2 => embassy_stm32::usart::InterruptHandler<peripherals::USART2>;
});

// ── Tasks ─────────────────────────────────────────────────────────────────────
#[embassy_executor::task(pool_size = 2)]
async fn timer_task(timer: PeriodicTimer<'static>) -> ! {
    timer.run().await
}

#[embassy_executor::task]
async fn sampling_task(task: SamplingTask<'static, HcSr04<'static, PB1>>) -> ! {
    task.run().await
}

#[embassy_executor::task]
async fn display_task(task: DisplayTask<'static, Lcd, Leds>) -> ! {
    task.run().await
}

#[embassy_executor::task]
async fn report_task(task: ReportTask<'static, SerialPort>) -> ! {
    task.run().await
}

#[embassy_executor::task]
async fn switch_1_task(button: ExtiInput<'static, PA4>, input: InputController<'static>) -> ! {
    drivers::switch::watch(button, Switch::One, input).await
}

#[embassy_executor::task]
async fn switch_2_task(button: ExtiInput<'static, PA5>, input: InputController<'static>) -> ! {
    drivers::switch::watch(button, Switch::Two, input).await
}

/// Feeds the input controller one received byte at a time.
#[embassy_executor::task]
async fn serial_command_task(mut rx: UartRx<'static, USART2, DMA1_CH5>, input: InputController<'static>) {
    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => {
                input.on_serial_byte(byte[0]);
            }
            Err(e) => warn!("serial rx error: {:?}", e),
        }
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // 1. Board init (168 MHz PLL, pins)
    let board = Board::init();
    info!("range monitor starting");

    // 2. Shared state and signals
    let state: &'static SharedState = STATE.init(SharedState::new());
    let sample_wake: &'static WakeSignal = SAMPLE_WAKE.init(WakeSignal::new());
    let display_wake: &'static WakeSignal = DISPLAY_WAKE.init(WakeSignal::new());
    let input = InputController::new(state);

    // 3. Timers. Bad configuration stops here.
    let mut timers = TimerService::new();
    unwrap!(timers.configure(TimerId::A, SAMPLE_PERIOD, Some(sample_wake)));
    unwrap!(timers.configure(TimerId::B, DISPLAY_PERIOD, Some(display_wake)));

    // 4. PC link USART2 @ 9600 (TX=PA2, RX=PA3)
    let mut uart_config = UsartConfig::default();
    uart_config.baudrate = SERIAL_BAUD;
    let s = board.serial;
    let uart = unwrap!(Uart::new(s.usart, s.rx, s.tx, Irqs, s.tx_dma, s.rx_dma, uart_config));
    let (uart_tx, uart_rx) = uart.split();

    // 5. Collaborators
    let sensor = HcSr04::new(board.trigger, board.echo);
    let lcd = Lcd::new(board.lcd_bcd, board.lcd_select);
    let leds = Leds::new(board.leds);

    // 6. Spawn the consumers first
    unwrap!(spawner.spawn(sampling_task(SamplingTask::new(state, sample_wake, sensor))));
    unwrap!(spawner.spawn(display_task(DisplayTask::new(state, display_wake, lcd, leds))));
    unwrap!(spawner.spawn(report_task(ReportTask::new(state, SerialPort::new(uart_tx)))));
    unwrap!(spawner.spawn(serial_command_task(uart_rx, input)));
    unwrap!(spawner.spawn(switch_1_task(board.switch_1, input)));
    unwrap!(spawner.spawn(switch_2_task(board.switch_2, input)));

    // Let every consumer reach its first wait before a timer can fire.
    embassy_futures::yield_now().await;

    // 7. Arm the timers on the interrupt executor
    interrupt::UART5.set_priority(Priority::P6);
    let timer_spawner = EXECUTOR_TIMERS.start(interrupt::UART5);
    unwrap!(timer_spawner.spawn(timer_task(unwrap!(timers.start(TimerId::A)))));
    unwrap!(timer_spawner.spawn(timer_task(unwrap!(timers.start(TimerId::B)))));

    info!("timers running");
}
