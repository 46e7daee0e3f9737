pub mod display;
pub mod input;
pub mod report;
pub mod sampling;
