//! Bounded command queues
//!
//! Receive tasks push complete command lines; the head loop pops one line
//! per iteration. A full queue drops the new line and counts the drop
//! instead of blocking the producer, so a flood of commands can never
//! stall the radio link.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use heapless::String;
use noggin_protocol::MAX_LINE_LEN;

/// One queued command line
pub type CommandLine = String<MAX_LINE_LEN>;

/// Lines buffered from the wireless link
pub const WIRELESS_QUEUE_DEPTH: usize = 8;

/// Lines buffered from the debug console
pub const CONSOLE_QUEUE_DEPTH: usize = 4;

/// Reasons a line was not queued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PushError {
    /// Nothing left after trimming
    Empty,
    /// Longer than [`MAX_LINE_LEN`]
    TooLong,
    /// Queue at capacity
    Full,
}

/// FIFO of command lines shared between a producer task and the head loop
pub struct CommandQueue<M: RawMutex, const N: usize> {
    channel: Channel<M, CommandLine, N>,
    dropped: Mutex<M, Cell<u32>>,
}

impl<M: RawMutex, const N: usize> CommandQueue<M, N> {
    /// Create an empty queue (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: Mutex::const_new(M::INIT, Cell::new(0)),
        }
    }

    /// Trim and enqueue a line
    ///
    /// Empty lines are ignored. Overlong lines and lines arriving while
    /// the queue is full are dropped and counted.
    pub fn push(&self, raw: &str) -> Result<(), PushError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(PushError::Empty);
        }

        let mut line = CommandLine::new();
        if line.push_str(text).is_err() {
            self.count_drop();
            return Err(PushError::TooLong);
        }

        self.push_line(line)
    }

    /// Enqueue an already assembled line
    pub fn push_line(&self, line: CommandLine) -> Result<(), PushError> {
        self.channel.try_send(line).map_err(|_| {
            self.count_drop();
            PushError::Full
        })
    }

    /// Take the oldest line, if any
    pub fn pop(&self) -> Option<CommandLine> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Lines discarded since boot
    pub fn dropped(&self) -> u32 {
        self.dropped.lock(|d| d.get())
    }

    fn count_drop(&self) {
        self.dropped.lock(|d| d.set(d.get().saturating_add(1)));
    }
}

impl<M: RawMutex, const N: usize> Default for CommandQueue<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a command line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Source {
    Wireless,
    Console,
}

/// The two command inputs, polled wireless first
pub struct CommandSources<'a, M: RawMutex, const W: usize, const C: usize> {
    wireless: &'a CommandQueue<M, W>,
    console: &'a CommandQueue<M, C>,
}

impl<'a, M: RawMutex, const W: usize, const C: usize> CommandSources<'a, M, W, C> {
    pub fn new(wireless: &'a CommandQueue<M, W>, console: &'a CommandQueue<M, C>) -> Self {
        Self { wireless, console }
    }

    /// Next line to execute
    ///
    /// Wireless lines always win; console lines are only taken when the
    /// wireless queue is empty.
    pub fn next(&self) -> Option<(Source, CommandLine)> {
        if let Some(line) = self.wireless.pop() {
            return Some((Source::Wireless, line));
        }
        self.console.pop().map(|line| (Source::Console, line))
    }

    /// Total lines dropped on both inputs
    pub fn dropped(&self) -> u32 {
        self.wireless.dropped().saturating_add(self.console.dropped())
    }
}
