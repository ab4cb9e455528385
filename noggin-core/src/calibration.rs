//! Persisted servo centers
//!
//! Each axis keeps its calibrated center in flash as a short decimal
//! ASCII record (`"93"`). On boot a missing or unreadable record is
//! replaced with the configured default, so the head always comes up with
//! a usable center. Factory `adjust_*` commands shift a center and write
//! it straight back.

use core::fmt::Write;

use heapless::String;
use noggin_hal::{FlashError, FlashStorage, StorageKey};
use noggin_protocol::Axis;

use crate::config::{HeadConfig, SERVO_MAX_DEG, SERVO_MIN_DEG};

/// Longest record we ever write ("180" plus a sign, with room to spare)
const MAX_RECORD_LEN: usize = 8;

/// Where a loaded center came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CenterSource {
    /// Read back from flash
    Stored,
    /// No record existed; the default was used and written
    Created,
    /// The record could not be used; the default replaced it
    Replaced(FlashError),
}

/// Result of loading one axis center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CenterLoad {
    pub axis: Axis,
    pub center: i16,
    pub source: CenterSource,
    /// Outcome of writing the default back (always `Ok` for `Stored`)
    pub persisted: Result<(), FlashError>,
}

/// Result of a factory center adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CenterAdjust {
    pub axis: Axis,
    pub center: i16,
    /// Center is applied in memory even when this is an error
    pub persisted: Result<(), FlashError>,
}

/// Flash-backed calibration centers for both axes
pub struct CalibrationStore<F> {
    storage: F,
    defaults: [i16; 2],
    centers: [i16; 2],
}

impl<F: FlashStorage> CalibrationStore<F> {
    /// Create a store using the configured default centers
    ///
    /// Centers read as the defaults until [`Self::load`] runs.
    pub fn new(storage: F, config: &HeadConfig) -> Self {
        let defaults = [config.pan.default_center, config.tilt.default_center];
        Self {
            storage,
            defaults,
            centers: defaults,
        }
    }

    /// Current center for an axis
    pub fn center(&self, axis: Axis) -> i16 {
        self.centers[axis.index()]
    }

    /// Load one axis center from flash, falling back to the default
    pub async fn load(&mut self, axis: Axis) -> CenterLoad {
        let key = storage_key(axis);
        let mut buffer = [0u8; MAX_RECORD_LEN];

        let read = match self.storage.read(key, &mut buffer).await {
            Ok(len) => decode_center(&buffer[..len]).ok_or(FlashError::Corrupted),
            Err(e) => Err(e),
        };

        let (center, source, persisted) = match read {
            Ok(center) => (center, CenterSource::Stored, Ok(())),
            Err(e) => {
                let center = self.defaults[axis.index()];
                let source = if e == FlashError::NotFound {
                    CenterSource::Created
                } else {
                    CenterSource::Replaced(e)
                };
                (center, source, self.persist(axis, center).await)
            }
        };

        self.centers[axis.index()] = center;

        CenterLoad {
            axis,
            center,
            source,
            persisted,
        }
    }

    /// Load both axis centers, pan first
    pub async fn load_all(&mut self) -> [CenterLoad; 2] {
        let pan = self.load(Axis::Pan).await;
        let tilt = self.load(Axis::Tilt).await;
        [pan, tilt]
    }

    /// Shift an axis center by `delta` degrees and persist it
    ///
    /// The result is clamped to the servo range.
    pub async fn adjust(&mut self, axis: Axis, delta: i16) -> CenterAdjust {
        let current = self.centers[axis.index()];
        let center = current.saturating_add(delta).clamp(SERVO_MIN_DEG, SERVO_MAX_DEG);

        self.centers[axis.index()] = center;
        let persisted = self.persist(axis, center).await;

        CenterAdjust {
            axis,
            center,
            persisted,
        }
    }

    /// Consume the store and return the underlying storage
    pub fn into_inner(self) -> F {
        self.storage
    }

    async fn persist(&mut self, axis: Axis, center: i16) -> Result<(), FlashError> {
        let record = encode_center(center);
        self.storage
            .write(storage_key(axis), record.as_bytes())
            .await
    }
}

fn storage_key(axis: Axis) -> StorageKey {
    match axis {
        Axis::Pan => StorageKey::PanCenter,
        Axis::Tilt => StorageKey::TiltCenter,
    }
}

fn encode_center(center: i16) -> String<MAX_RECORD_LEN> {
    let mut record = String::new();
    // An i16 is at most six characters
    let _ = write!(record, "{}", center);
    record
}

/// Decode a stored record, rejecting anything outside the servo range
fn decode_center(record: &[u8]) -> Option<i16> {
    let text = core::str::from_utf8(record).ok()?;
    let center = text.trim().parse::<i16>().ok()?;
    (SERVO_MIN_DEG..=SERVO_MAX_DEG)
        .contains(&center)
        .then_some(center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryFlash;
    use embassy_futures::block_on;

    fn store(flash: MemoryFlash) -> CalibrationStore<MemoryFlash> {
        CalibrationStore::new(flash, &HeadConfig::default())
    }

    #[test]
    fn test_decode_center() {
        assert_eq!(decode_center(b"93"), Some(93));
        assert_eq!(decode_center(b"0"), Some(0));
        assert_eq!(decode_center(b"180"), Some(180));
        assert_eq!(decode_center(b"181"), None);
        assert_eq!(decode_center(b"-1"), None);
        assert_eq!(decode_center(b"ninety"), None);
        assert_eq!(decode_center(b""), None);
        assert_eq!(decode_center(&[0xFF, 0xFF]), None);
    }

    #[test]
    fn test_load_stored_center() {
        let mut cal = store(MemoryFlash::with_record(StorageKey::PanCenter, b"97"));
        let load = block_on(cal.load(Axis::Pan));

        assert_eq!(load.center, 97);
        assert_eq!(load.source, CenterSource::Stored);
        assert_eq!(load.persisted, Ok(()));
        assert_eq!(cal.center(Axis::Pan), 97);
        assert_eq!(cal.into_inner().writes, 0);
    }

    #[test]
    fn test_missing_record_writes_default() {
        let mut cal = store(MemoryFlash::default());
        let load = block_on(cal.load(Axis::Tilt));

        assert_eq!(load.center, 90);
        assert_eq!(load.source, CenterSource::Created);
        assert_eq!(load.persisted, Ok(()));

        let flash = cal.into_inner();
        assert_eq!(flash.record(StorageKey::TiltCenter), Some(&b"90"[..]));
    }

    #[test]
    fn test_corrupt_record_is_replaced() {
        let mut cal = store(MemoryFlash::with_record(StorageKey::PanCenter, b"garbage"));
        let load = block_on(cal.load(Axis::Pan));

        assert_eq!(load.center, 90);
        assert_eq!(load.source, CenterSource::Replaced(FlashError::Corrupted));

        let flash = cal.into_inner();
        assert_eq!(flash.record(StorageKey::PanCenter), Some(&b"90"[..]));
    }

    #[test]
    fn test_failed_write_still_yields_center() {
        let mut flash = MemoryFlash::default();
        flash.fail_writes = true;
        let mut cal = store(flash);

        let load = block_on(cal.load(Axis::Pan));
        assert_eq!(load.center, 90);
        assert_eq!(load.persisted, Err(FlashError::Flash));
    }

    #[test]
    fn test_adjust_then_reload() {
        let mut cal = store(MemoryFlash::default());
        block_on(cal.load_all());

        let adjust = block_on(cal.adjust(Axis::Pan, 5));
        assert_eq!(adjust.center, 95);
        assert_eq!(adjust.persisted, Ok(()));

        let adjust = block_on(cal.adjust(Axis::Tilt, -12));
        assert_eq!(adjust.center, 78);

        // Simulate a restart on the same flash
        let mut cal = store(cal.into_inner());
        let [pan, tilt] = block_on(cal.load_all());
        assert_eq!(pan.center, 95);
        assert_eq!(pan.source, CenterSource::Stored);
        assert_eq!(tilt.center, 78);
        assert_eq!(tilt.source, CenterSource::Stored);
    }

    #[test]
    fn test_adjust_clamps_to_servo_range() {
        let mut cal = store(MemoryFlash::default());
        assert_eq!(block_on(cal.adjust(Axis::Pan, 500)).center, 180);
        assert_eq!(block_on(cal.adjust(Axis::Pan, i16::MIN)).center, 0);
    }

    #[test]
    fn test_adjust_applies_despite_write_failure() {
        let mut flash = MemoryFlash::default();
        flash.fail_writes = true;
        let mut cal = store(flash);

        let adjust = block_on(cal.adjust(Axis::Tilt, 3));
        assert_eq!(adjust.center, 93);
        assert_eq!(adjust.persisted, Err(FlashError::Flash));
        assert_eq!(cal.center(Axis::Tilt), 93);
    }
}
