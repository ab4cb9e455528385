//! Embassy async tasks
//!
//! Each task runs independently and communicates via the command queues.

pub mod console_rx;
pub mod head;
pub mod wireless_rx;

pub use console_rx::console_rx_task;
pub use head::{head_task, HeadRouter};
pub use wireless_rx::wireless_rx_task;

use defmt::*;
use embassy_sync::blocking_mutex::raw::RawMutex;

use noggin_core::queue::{CommandQueue, PushError};
use noggin_protocol::LineError;

use crate::channels::CommandLineResult;

/// Hand an assembled line to a queue, logging anything dropped
pub(crate) fn enqueue<M: RawMutex, const N: usize>(
    queue: &CommandQueue<M, N>,
    source: &str,
    line: CommandLineResult,
) {
    match line {
        Ok(line) => {
            debug!("{} RX: {}", source, line.as_str());
            match queue.push_line(line) {
                Ok(()) => {}
                Err(PushError::Full) => warn!(
                    "{} queue full, dropping command ({} dropped)",
                    source,
                    queue.dropped()
                ),
                Err(e) => warn!("{} command rejected: {:?}", source, e),
            }
        }
        Err(LineError::TooLong) => warn!("{} line too long, discarded", source),
        Err(LineError::InvalidUtf8) => warn!("{} line not UTF-8, discarded", source),
    }
}
