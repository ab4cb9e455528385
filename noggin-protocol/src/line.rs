//! Line framing for byte streams
//!
//! Serial links deliver bytes, not commands. [`LineAssembler`] collects
//! bytes until a line terminator (`\n` or `\r`) or an explicit flush
//! (used when the link goes idle, since a BLE write does not always end
//! in a newline) and yields one trimmed command line.

use heapless::{String, Vec};

/// Maximum length of a single command line in bytes
///
/// Fits a batch of [`crate::MAX_ACTIONS`] of the longest action token plus
/// a factory command.
pub const MAX_LINE_LEN: usize = 384;

/// Errors from line assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the buffer and was discarded
    TooLong,
    /// Line was not valid UTF-8 and was discarded
    InvalidUtf8,
}

/// Byte-stream to line assembler
#[derive(Debug, Clone, Default)]
pub struct LineAssembler<const N: usize = MAX_LINE_LEN> {
    buffer: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> LineAssembler<N> {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte
    ///
    /// Returns `Some` when the byte completed a non-empty line (or
    /// completed a line that had to be discarded).
    pub fn feed(&mut self, byte: u8) -> Option<Result<String<N>, LineError>> {
        match byte {
            b'\n' | b'\r' => self.flush(),
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    /// Terminate the current line, if any
    pub fn flush(&mut self) -> Option<Result<String<N>, LineError>> {
        if self.overflowed {
            self.reset();
            return Some(Err(LineError::TooLong));
        }

        let result = match core::str::from_utf8(&self.buffer) {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    let mut line = String::new();
                    // Cannot fail: the trimmed text is no longer than the buffer
                    let _ = line.push_str(text);
                    Some(Ok(line))
                }
            }
            Err(_) => Some(Err(LineError::InvalidUtf8)),
        };

        self.reset();
        result
    }

    /// Check if a partial line is pending
    pub fn is_pending(&self) -> bool {
        !self.buffer.is_empty() || self.overflowed
    }

    /// Discard any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }
}
