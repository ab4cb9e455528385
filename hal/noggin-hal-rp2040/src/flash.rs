//! Flash storage driver for RP2040
//!
//! Uses sequential-storage for wear-leveled key-value storage in the last
//! 16KB of flash. Records are a few bytes each, so four erase sectors
//! give years of center adjustments before any sector wears out.
//!
//! Implements the `FlashStorage` trait from `noggin-hal`.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use noggin_hal::flash::{FlashError, StorageKey};

/// 2MB flash on the Raspberry Pi Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Calibration partition at the end of flash
pub const CALIBRATION_PARTITION_SIZE: usize = 4 * ERASE_SIZE;
pub const CALIBRATION_PARTITION_START: usize = FLASH_SIZE - CALIBRATION_PARTITION_SIZE;

/// Flash range handed to sequential-storage
pub const CALIBRATION_RANGE: core::ops::Range<u32> =
    (CALIBRATION_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one stored item (key, length header and value)
const ITEM_BUFFER_SIZE: usize = 64;

/// RP2040 flash storage implementation
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Rp2040FlashStorage<'d> {
    /// Create a new flash storage instance
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

fn storage_error<S>(e: sequential_storage::Error<S>) -> FlashError {
    match e {
        sequential_storage::Error::Storage { .. } => FlashError::Flash,
        sequential_storage::Error::FullStorage { .. } => FlashError::Full,
        sequential_storage::Error::Corrupted { .. } => FlashError::Corrupted,
        sequential_storage::Error::BufferTooSmall { .. } => FlashError::BufferTooSmall,
        _ => FlashError::Storage,
    }
}

impl noggin_hal::FlashStorage for Rp2040FlashStorage<'_> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_SIZE];

        let data = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            CALIBRATION_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        )
        .await
        .map_err(storage_error)?
        .ok_or(FlashError::NotFound)?;

        let len = data.len();
        if buffer.len() < len {
            return Err(FlashError::BufferTooSmall);
        }
        buffer[..len].copy_from_slice(data);
        Ok(len)
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        let mut data_buffer = [0u8; ITEM_BUFFER_SIZE];

        map::store_item(
            &mut self.flash,
            CALIBRATION_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &data,
        )
        .await
        .map_err(storage_error)
    }
}
