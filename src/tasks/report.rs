use core::fmt::Write;

use embassy_time::Ticker;

use crate::config::REPORT_PERIOD;
use crate::state::SharedState;

/// Outgoing serial link. Best effort: the reporting task logs a failed send
/// and moves on.
#[allow(async_fn_in_trait)]
pub trait SerialOut {
    type Error;

    async fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Longest line is `u32::MAX` at 31 bytes.
pub type ReportLine = heapless::String<32>;

pub fn format_report(cm: u32) -> ReportLine {
    let mut line = ReportLine::new();
    // cannot overflow: capacity covers the widest u32
    let _ = write!(line, "la distancia es:{} cm\r\n", cm);
    line
}

/// Reporting task: free-running, once per `REPORT_PERIOD`.
///
/// Reports the last stored sample whatever the mode flags say, so a
/// suspended monitor keeps repeating its final reading.
pub struct ReportTask<'a, W> {
    state: &'a SharedState,
    serial: W,
}

impl<'a, W: SerialOut> ReportTask<'a, W> {
    pub fn new(state: &'a SharedState, serial: W) -> Self {
        Self { state, serial }
    }

    pub async fn cycle(&mut self) -> Result<(), W::Error> {
        let line = format_report(self.state.last_distance());
        let res = self.serial.send(line.as_bytes()).await;
        if res.is_err() {
            warn!("report send failed");
        }
        res
    }

    pub async fn run(mut self) -> ! {
        let mut ticker = Ticker::every(REPORT_PERIOD);
        loop {
            ticker.next().await;
            let _ = self.cycle().await;
        }
    }

    pub fn serial(&self) -> &W {
        &self.serial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[derive(Default)]
    struct Capture {
        lines: Vec<Vec<u8>>,
        fail: bool,
    }

    impl SerialOut for Capture {
        type Error = ();

        async fn send(&mut self, bytes: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.lines.push(bytes.to_vec());
            Ok(())
        }
    }

    #[test]
    fn line_format() {
        assert_eq!(format_report(0).as_str(), "la distancia es:0 cm\r\n");
        assert_eq!(format_report(25).as_str(), "la distancia es:25 cm\r\n");
    }

    #[test]
    fn widest_value_fits() {
        let line = format_report(u32::MAX);
        assert_eq!(line.as_str(), "la distancia es:4294967295 cm\r\n");
    }

    #[futures_test::test]
    async fn reports_even_when_suspended() {
        let state = SharedState::new();
        state.store_distance(42);
        state.toggle_measurement();
        state.toggle_hold();
        let mut task = ReportTask::new(&state, Capture::default());

        task.cycle().await.unwrap();
        task.cycle().await.unwrap();
        assert_eq!(task.serial().lines.len(), 2);
        assert_eq!(task.serial().lines[1], b"la distancia es:42 cm\r\n");
    }

    #[futures_test::test]
    async fn send_failure_is_returned_not_fatal() {
        let state = SharedState::new();
        let mut task = ReportTask::new(
            &state,
            Capture {
                fail: true,
                ..Default::default()
            },
        );
        assert_eq!(task.cycle().await, Err(()));
        assert_eq!(task.cycle().await, Err(()));
    }
}
