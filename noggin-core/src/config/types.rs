//! Configuration type definitions

use noggin_protocol::Axis;

/// Lowest angle the servos accept
pub const SERVO_MIN_DEG: i16 = 0;

/// Highest angle the servos accept
pub const SERVO_MAX_DEG: i16 = 180;

/// Factory center for both axes
pub const DEFAULT_CENTER_DEG: i16 = 90;

/// Allowed pan swing either side of center
pub const DEFAULT_PAN_OFFSET_DEG: i16 = 40;

/// Allowed tilt swing either side of center
pub const DEFAULT_TILT_OFFSET_DEG: i16 = 30;

/// Per-axis calibration defaults and limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisConfig {
    /// Center used when nothing is stored in flash
    pub default_center: i16,
    /// Maximum deviation from center in either direction
    pub offset: i16,
}

impl AxisConfig {
    /// Pan axis defaults
    pub const fn pan() -> Self {
        Self {
            default_center: DEFAULT_CENTER_DEG,
            offset: DEFAULT_PAN_OFFSET_DEG,
        }
    }

    /// Tilt axis defaults
    pub const fn tilt() -> Self {
        Self {
            default_center: DEFAULT_CENTER_DEG,
            offset: DEFAULT_TILT_OFFSET_DEG,
        }
    }
}

/// Motion timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Degrees per interpolation step
    pub step_deg: i16,
    /// Delay after each interpolation step (ms)
    pub step_delay_ms: u32,
    /// Pause between the segments of a gesture (ms)
    pub gesture_pause_ms: u32,
    /// Distance covered by `head_left`/`right`/`up`/`down` (degrees)
    pub nudge_deg: i16,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            step_deg: 1,
            step_delay_ms: 5,
            gesture_pause_ms: 50,
            nudge_deg: 15,
        }
    }
}

/// Idle demo cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DemoConfig {
    /// Run the demo cycle when no commands arrive
    pub enabled: bool,
    /// Time between demo steps (ms)
    pub interval_ms: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 5000,
        }
    }
}

/// Complete head configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeadConfig {
    pub pan: AxisConfig,
    pub tilt: AxisConfig,
    pub motion: MotionConfig,
    pub demo: DemoConfig,
    /// Main loop polling interval (ms)
    pub tick_ms: u32,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            pan: AxisConfig::pan(),
            tilt: AxisConfig::tilt(),
            motion: MotionConfig::default(),
            demo: DemoConfig::default(),
            tick_ms: 10,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Default center outside the servo range
    CenterOutOfRange(Axis),
    /// Negative swing offset
    NegativeOffset(Axis),
    /// Interpolation step must be at least one degree
    ZeroStep,
    /// Polling interval must be non-zero
    ZeroTick,
}

impl HeadConfig {
    /// Limits for one axis
    pub fn axis(&self, axis: Axis) -> &AxisConfig {
        match axis {
            Axis::Pan => &self.pan,
            Axis::Tilt => &self.tilt,
        }
    }

    /// Check the configuration for values the motion code cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in Axis::ALL {
            let limits = self.axis(axis);
            if !(SERVO_MIN_DEG..=SERVO_MAX_DEG).contains(&limits.default_center) {
                return Err(ConfigError::CenterOutOfRange(axis));
            }
            if limits.offset < 0 {
                return Err(ConfigError::NegativeOffset(axis));
            }
        }

        if self.motion.step_deg < 1 {
            return Err(ConfigError::ZeroStep);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HeadConfig::default();
        assert_eq!(config.pan.default_center, 90);
        assert_eq!(config.pan.offset, 40);
        assert_eq!(config.tilt.offset, 30);
        assert_eq!(config.motion.step_deg, 1);
        assert_eq!(config.motion.step_delay_ms, 5);
        assert_eq!(config.demo.interval_ms, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_axis_lookup() {
        let config = HeadConfig::default();
        assert_eq!(config.axis(Axis::Pan).offset, DEFAULT_PAN_OFFSET_DEG);
        assert_eq!(config.axis(Axis::Tilt).offset, DEFAULT_TILT_OFFSET_DEG);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = HeadConfig::default();
        config.tilt.default_center = 200;
        assert_eq!(
            config.validate(),
            Err(ConfigError::CenterOutOfRange(Axis::Tilt))
        );

        let mut config = HeadConfig::default();
        config.pan.offset = -1;
        assert_eq!(config.validate(), Err(ConfigError::NegativeOffset(Axis::Pan)));

        let mut config = HeadConfig::default();
        config.motion.step_deg = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroStep));

        let mut config = HeadConfig::default();
        config.tick_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTick));
    }
}
