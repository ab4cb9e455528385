//! Per-axis position and bounds

use crate::config::{AxisConfig, SERVO_MAX_DEG, SERVO_MIN_DEG};

/// Position, center and travel limits of one servo axis
///
/// Invariant: `min <= center <= max`, all within the servo range.
/// `current` is where the servo last was driven. It stays inside the
/// limits except right after a center change, until the next move walks
/// it back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisState {
    current: i16,
    center: i16,
    offset: i16,
    min: i16,
    max: i16,
}

impl AxisState {
    /// Create an axis resting at its configured default center
    pub fn new(config: &AxisConfig) -> Self {
        let mut axis = Self {
            current: 0,
            center: 0,
            offset: config.offset.max(0),
            min: SERVO_MIN_DEG,
            max: SERVO_MAX_DEG,
        };
        axis.set_center(config.default_center);
        axis.current = axis.center;
        axis
    }

    pub fn current(&self) -> i16 {
        self.current
    }

    pub fn center(&self) -> i16 {
        self.center
    }

    pub fn min(&self) -> i16 {
        self.min
    }

    pub fn max(&self) -> i16 {
        self.max
    }

    pub fn offset(&self) -> i16 {
        self.offset
    }

    /// Change the center and recompute the travel limits
    ///
    /// The current position is left alone: the servo has not moved.
    pub fn set_center(&mut self, center: i16) {
        self.center = center.clamp(SERVO_MIN_DEG, SERVO_MAX_DEG);
        self.recompute_bounds();
    }

    /// Derive `min`/`max` from `center ± offset`, clipped to the servo range
    pub fn recompute_bounds(&mut self) {
        self.min = self.center.saturating_sub(self.offset).max(SERVO_MIN_DEG);
        self.max = self.center.saturating_add(self.offset).min(SERVO_MAX_DEG);
    }

    /// Clamp an angle into the travel limits
    pub fn clamp(&self, angle: i16) -> i16 {
        angle.clamp(self.min, self.max)
    }

    /// Target after moving `delta` degrees from the current position
    pub fn target_for(&self, delta: i16) -> i16 {
        let target = i32::from(self.current) + i32::from(delta);
        // Bounds fit in i16, so the clamped value does too
        target.clamp(i32::from(self.min), i32::from(self.max)) as i16
    }

    /// Record a position the servo was just driven to
    ///
    /// Not clamped: a walk back inside new limits passes through angles
    /// outside them.
    pub(crate) fn set_current(&mut self, angle: i16) {
        self.current = angle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(center: i16, offset: i16) -> AxisState {
        AxisState::new(&AxisConfig {
            default_center: center,
            offset,
        })
    }

    #[test]
    fn test_bounds_from_center() {
        let pan = axis(90, 40);
        assert_eq!(pan.min(), 50);
        assert_eq!(pan.max(), 130);
        assert_eq!(pan.current(), 90);
    }

    #[test]
    fn test_bounds_clipped_to_servo_range() {
        let edge = axis(170, 30);
        assert_eq!(edge.min(), 140);
        assert_eq!(edge.max(), 180);

        let edge = axis(5, 30);
        assert_eq!(edge.min(), 0);
        assert_eq!(edge.max(), 35);
    }

    #[test]
    fn test_set_center_recomputes_bounds() {
        let mut tilt = axis(90, 30);
        tilt.set_center(100);
        assert_eq!(tilt.center(), 100);
        assert_eq!(tilt.min(), 70);
        assert_eq!(tilt.max(), 130);
    }

    #[test]
    fn test_set_center_keeps_real_position() {
        let mut tilt = axis(90, 10);
        tilt.set_current(100);
        tilt.set_center(60);
        assert_eq!(tilt.max(), 70);
        assert_eq!(tilt.current(), 100);
        // The next move heads back inside the new limits
        assert_eq!(tilt.target_for(0), 70);
        assert_eq!(tilt.target_for(-45), 55);
    }

    #[test]
    fn test_target_for_clamps() {
        let pan = axis(90, 40);
        assert_eq!(pan.target_for(10), 100);
        assert_eq!(pan.target_for(100), 130);
        assert_eq!(pan.target_for(i16::MIN), 50);
        assert_eq!(pan.target_for(i16::MAX), 130);
    }

    #[test]
    fn test_negative_offset_treated_as_zero() {
        let pinned = axis(90, -5);
        assert_eq!(pinned.min(), 90);
        assert_eq!(pinned.max(), 90);
    }
}
