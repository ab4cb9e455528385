//! Inter-task communication
//!
//! The receive tasks own the UARTs and push complete command lines; the
//! head task is the only consumer. Both queues are safe to push from one
//! task while another pops.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use noggin_core::queue::{CommandQueue, CONSOLE_QUEUE_DEPTH, WIRELESS_QUEUE_DEPTH};

/// Lines from the BLE serial bridge
pub static COMMAND_QUEUE: CommandQueue<CriticalSectionRawMutex, WIRELESS_QUEUE_DEPTH> =
    CommandQueue::new();

/// Lines typed on the debug console
pub static CONSOLE_QUEUE: CommandQueue<CriticalSectionRawMutex, CONSOLE_QUEUE_DEPTH> =
    CommandQueue::new();

/// A completed line from a receive task's assembler
pub type CommandLineResult = Result<noggin_core::queue::CommandLine, noggin_protocol::LineError>;
