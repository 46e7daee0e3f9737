use embassy_stm32::peripherals::{DMA1_CH6, USART2};
use embassy_stm32::usart::{Error, UartTx};
use range_monitor::SerialOut;

/// TX half of the PC link.
pub struct SerialPort {
    tx: UartTx<'static, USART2, DMA1_CH6>,
}

impl SerialPort {
    pub fn new(tx: UartTx<'static, USART2, DMA1_CH6>) -> Self {
        Self { tx }
    }
}

impl SerialOut for SerialPort {
    type Error = Error;

    async fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.tx.write(bytes).await
    }
}
