//! Host test doubles for the hardware traits

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;
use noggin_hal::{FlashError, FlashStorage, StorageKey};
use noggin_protocol::Expression;

use crate::traits::{Face, FaceError, ServoOutput};

/// In-memory key/value flash
#[derive(Debug, Default)]
pub struct MemoryFlash {
    pub records: HashMap<StorageKey, Vec<u8>>,
    pub fail_writes: bool,
    pub fail_reads: bool,
    pub writes: usize,
}

impl MemoryFlash {
    pub fn with_record(key: StorageKey, data: &[u8]) -> Self {
        let mut flash = Self::default();
        flash.records.insert(key, data.to_vec());
        flash
    }

    pub fn record(&self, key: StorageKey) -> Option<&[u8]> {
        self.records.get(&key).map(Vec::as_slice)
    }
}

impl FlashStorage for MemoryFlash {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        if self.fail_reads {
            return Err(FlashError::Flash);
        }
        let data = self.records.get(&key).ok_or(FlashError::NotFound)?;
        if data.len() > buffer.len() {
            return Err(FlashError::BufferTooSmall);
        }
        buffer[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if self.fail_writes {
            return Err(FlashError::Flash);
        }
        self.writes += 1;
        self.records.insert(key, data.to_vec());
        Ok(())
    }
}

/// Servo that records every commanded angle
#[derive(Debug, Clone, Default)]
pub struct RecordingServo {
    pub angles: Rc<RefCell<Vec<u8>>>,
}

impl RecordingServo {
    pub fn last(&self) -> Option<u8> {
        self.angles.borrow().last().copied()
    }

    pub fn count(&self) -> usize {
        self.angles.borrow().len()
    }
}

impl ServoOutput for RecordingServo {
    fn set_angle(&mut self, degrees: u8) {
        self.angles.borrow_mut().push(degrees);
    }
}

/// Delay that returns immediately and sums the requested time
#[derive(Debug, Clone, Default)]
pub struct CountingDelay {
    pub total_ns: Rc<Cell<u64>>,
}

impl CountingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns.get() / 1_000_000
    }
}

impl DelayNs for CountingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.total_ns
            .set(self.total_ns.get() + u64::from(ms) * 1_000_000);
    }
}

/// A face call as seen by [`RecordingFace`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceCall {
    Show(Expression),
    Animation(u8),
}

/// Face that records calls and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingFace {
    pub calls: Vec<FaceCall>,
    pub fail_with: Option<FaceError>,
}

impl Face for RecordingFace {
    async fn show(&mut self, expression: Expression) -> Result<(), FaceError> {
        self.calls.push(FaceCall::Show(expression));
        self.fail_with.map_or(Ok(()), Err)
    }

    async fn play_animation(&mut self, id: u8) -> Result<(), FaceError> {
        self.calls.push(FaceCall::Animation(id));
        self.fail_with.map_or(Ok(()), Err)
    }
}
