//! Wireless receive task
//!
//! The BLE module runs a transparent serial bridge on UART0. A phone write
//! arrives as a burst of bytes that may or may not end in a newline, so a
//! line is also closed when the link has been idle for [`IDLE_FLUSH_MS`].

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Read;

use noggin_protocol::LineAssembler;

use super::enqueue;
use crate::channels::COMMAND_QUEUE;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Idle time that ends an unterminated line
pub const IDLE_FLUSH_MS: u64 = 20;

/// Wireless RX task - assembles command lines into the command queue
#[embassy_executor::task]
pub async fn wireless_rx_task(mut rx: BufferedUartRx) {
    info!("Wireless RX task started");

    let mut assembler: LineAssembler = LineAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let read = if assembler.is_pending() {
            with_timeout(Duration::from_millis(IDLE_FLUSH_MS), rx.read(&mut buf)).await
        } else {
            Ok(rx.read(&mut buf).await)
        };

        match read {
            Ok(Ok(n)) => {
                trace!("Wireless RX: {} bytes", n);
                for &byte in &buf[..n] {
                    if let Some(line) = assembler.feed(byte) {
                        enqueue(&COMMAND_QUEUE, "Wireless", line);
                    }
                }
            }
            Ok(Err(e)) => {
                warn!("Wireless UART read error: {:?}", e);
                assembler.reset();
            }
            Err(_) => {
                // Link went quiet mid-line
                if let Some(line) = assembler.flush() {
                    enqueue(&COMMAND_QUEUE, "Wireless", line);
                }
            }
        }
    }
}
