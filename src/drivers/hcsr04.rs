use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{AnyPin, Output, Pin};
use embassy_time::{with_timeout, Duration, Instant, Timer};
use range_monitor::RangeSensor;

/// Longest we wait for either echo edge. Beyond ~5 m the sensor gives up
/// well before this.
const ECHO_TIMEOUT: Duration = Duration::from_millis(30);
/// Round-trip echo time per centimeter (343 m/s).
const US_PER_CM: u64 = 58;

/// HC-SR04 ultrasonic ranger. Trigger is a plain output, echo sits on an
/// EXTI line so the edges are awaited instead of polled.
pub struct HcSr04<'d, E: Pin> {
    trigger: Output<'d, AnyPin>,
    echo: ExtiInput<'d, E>,
    last_cm: u32,
}

impl<'d, E: Pin> HcSr04<'d, E> {
    pub fn new(trigger: Output<'d, AnyPin>, echo: ExtiInput<'d, E>) -> Self {
        Self {
            trigger,
            echo,
            last_cm: 0,
        }
    }

    async fn echo_us(&mut self) -> Option<u64> {
        // 10 us trigger pulse
        self.trigger.set_low();
        Timer::after_micros(2).await;
        self.trigger.set_high();
        Timer::after_micros(10).await;
        self.trigger.set_low();

        with_timeout(ECHO_TIMEOUT, self.echo.wait_for_high()).await.ok()?;
        let start = Instant::now();
        with_timeout(ECHO_TIMEOUT, self.echo.wait_for_low()).await.ok()?;
        Some((Instant::now() - start).as_micros())
    }
}

impl<E: Pin> RangeSensor for HcSr04<'_, E> {
    async fn measure(&mut self) -> u32 {
        match self.echo_us().await {
            Some(us) => {
                self.last_cm = (us / US_PER_CM) as u32;
            }
            None => {
                // Missed echo: keep reporting the last good distance
                defmt::debug!("hc-sr04 echo timeout");
            }
        }
        self.last_cm
    }
}
