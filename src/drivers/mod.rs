pub mod hcsr04;
pub mod lcd;
pub mod leds;
pub mod serial;
pub mod switch;
