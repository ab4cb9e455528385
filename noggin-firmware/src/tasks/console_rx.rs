//! Debug console receive task
//!
//! Lines typed on UART1 go through the same router as wireless commands,
//! which makes the console the easiest way to run factory calibration.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use noggin_protocol::LineAssembler;

use super::enqueue;
use crate::channels::CONSOLE_QUEUE;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Console RX task - newline-terminated lines into the console queue
#[embassy_executor::task]
pub async fn console_rx_task(mut rx: BufferedUartRx) {
    info!("Console RX task started");

    let mut assembler: LineAssembler = LineAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                for &byte in &buf[..n] {
                    if let Some(line) = assembler.feed(byte) {
                        enqueue(&CONSOLE_QUEUE, "Console", line);
                    }
                }
            }
            Err(e) => {
                warn!("Console UART read error: {:?}", e);
                assembler.reset();
            }
        }
    }
}
