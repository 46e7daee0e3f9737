use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Pin;
use embassy_time::{Duration, Timer};
use range_monitor::{InputController, Switch};

/// Contact bounce settles well within this.
const DEBOUNCE: Duration = Duration::from_millis(30);

/// Turns presses on an active-low switch into `InputController` edges.
pub async fn watch<T: Pin>(mut button: ExtiInput<'static, T>, switch: Switch, input: InputController<'static>) -> ! {
    loop {
        button.wait_for_falling_edge().await;
        Timer::after(DEBOUNCE).await;
        if button.is_low() {
            input.on_switch(switch);
            button.wait_for_high().await;
        }
        Timer::after(DEBOUNCE).await;
    }
}
