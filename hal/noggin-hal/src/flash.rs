//! Persistent records in flash
//!
//! The head keeps very little across power cycles: one calibrated center
//! angle per servo axis. Each lives in its own record, addressed by a
//! [`StorageKey`].

/// Record keys
///
/// The discriminant is the on-flash key byte; never renumber a variant or
/// existing calibration is orphaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Pan (X) axis center angle, decimal text
    PanCenter = 0,
    /// Tilt (Y) axis center angle, decimal text
    TiltCenter = 1,
}

impl StorageKey {
    /// Every key, in key byte order
    pub const ALL: [StorageKey; 2] = [StorageKey::PanCenter, StorageKey::TiltCenter];

    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.to_byte() == byte)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// The flash peripheral reported an error
    Flash,
    /// The storage layer failed for another reason
    Storage,
    /// No record under this key
    NotFound,
    /// The record does not fit the caller's buffer
    BufferTooSmall,
    /// Record bytes failed the integrity check
    Corrupted,
    /// No space left in the partition
    Full,
}

/// Key/value record storage
///
/// A write replaces the whole record. Nothing is promised across a power
/// loss mid-write: callers must treat a missing or unreadable record as
/// recoverable.
pub trait FlashStorage {
    /// Read the record under `key` into `buffer`, returning its length
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Store `data` under `key`
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let slot = buffer
            .first_mut()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        *slot = self.to_byte();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let byte = buffer
            .first()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        StorageKey::from_byte(*byte)
            .map(|key| (key, 1))
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bytes_are_stable() {
        assert_eq!(StorageKey::PanCenter.to_byte(), 0);
        assert_eq!(StorageKey::TiltCenter.to_byte(), 1);
    }

    #[test]
    fn test_key_from_byte() {
        for key in StorageKey::ALL {
            assert_eq!(StorageKey::from_byte(key.to_byte()), Some(key));
        }
        assert_eq!(StorageKey::from_byte(2), None);
        assert_eq!(StorageKey::from_byte(0xFF), None);
    }
}
