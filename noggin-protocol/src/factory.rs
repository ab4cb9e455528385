//! Factory command grammar
//!
//! Privileged commands used for calibration and maintenance:
//! - `reboot`: hardware reset
//! - `adjust_x_<int>`: shift the pan center by a signed number of degrees
//! - `adjust_y_<int>`: shift the tilt center by a signed number of degrees

use core::fmt;

const REBOOT: &str = "reboot";
const ADJUST_PAN_PREFIX: &str = "adjust_x_";
const ADJUST_TILT_PREFIX: &str = "adjust_y_";

/// Servo axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Horizontal pan (X)
    Pan,
    /// Vertical tilt (Y)
    Tilt,
}

impl Axis {
    /// Both axes, pan first
    pub const ALL: [Axis; 2] = [Axis::Pan, Axis::Tilt];

    /// Index into per-axis arrays
    pub const fn index(self) -> usize {
        match self {
            Axis::Pan => 0,
            Axis::Tilt => 1,
        }
    }
}

/// A parsed factory command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FactoryCommand {
    /// Immediate hardware reset
    Reboot,
    /// Move the persisted center of an axis
    AdjustCenter { axis: Axis, delta: i16 },
}

/// Errors from factory command parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FactoryError {
    /// Not a factory command
    Unknown,
    /// `adjust_*` prefix matched but the offset is not an integer
    InvalidOffset,
}

impl FactoryCommand {
    /// Parse a factory token
    pub fn parse(token: &str) -> Result<Self, FactoryError> {
        if token == REBOOT {
            return Ok(FactoryCommand::Reboot);
        }

        let (axis, offset) = if let Some(rest) = token.strip_prefix(ADJUST_PAN_PREFIX) {
            (Axis::Pan, rest)
        } else if let Some(rest) = token.strip_prefix(ADJUST_TILT_PREFIX) {
            (Axis::Tilt, rest)
        } else {
            return Err(FactoryError::Unknown);
        };

        let delta = offset
            .parse::<i16>()
            .map_err(|_| FactoryError::InvalidOffset)?;

        Ok(FactoryCommand::AdjustCenter { axis, delta })
    }
}

impl fmt::Display for FactoryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryCommand::Reboot => f.write_str(REBOOT),
            FactoryCommand::AdjustCenter {
                axis: Axis::Pan,
                delta,
            } => write!(f, "{}{}", ADJUST_PAN_PREFIX, delta),
            FactoryCommand::AdjustCenter {
                axis: Axis::Tilt,
                delta,
            } => write!(f, "{}{}", ADJUST_TILT_PREFIX, delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use proptest::prelude::*;

    #[test]
    fn test_reboot() {
        assert_eq!(FactoryCommand::parse("reboot"), Ok(FactoryCommand::Reboot));
        assert_eq!(
            FactoryCommand::parse("reboot_now"),
            Err(FactoryError::Unknown)
        );
    }

    #[test]
    fn test_adjust_axes() {
        assert_eq!(
            FactoryCommand::parse("adjust_x_10"),
            Ok(FactoryCommand::AdjustCenter {
                axis: Axis::Pan,
                delta: 10
            })
        );
        assert_eq!(
            FactoryCommand::parse("adjust_y_-4"),
            Ok(FactoryCommand::AdjustCenter {
                axis: Axis::Tilt,
                delta: -4
            })
        );
        assert_eq!(
            FactoryCommand::parse("adjust_x_+3"),
            Ok(FactoryCommand::AdjustCenter {
                axis: Axis::Pan,
                delta: 3
            })
        );
    }

    #[test]
    fn test_adjust_invalid_offset() {
        assert_eq!(
            FactoryCommand::parse("adjust_x_"),
            Err(FactoryError::InvalidOffset)
        );
        assert_eq!(
            FactoryCommand::parse("adjust_y_ten"),
            Err(FactoryError::InvalidOffset)
        );
        assert_eq!(
            FactoryCommand::parse("adjust_x_99999"),
            Err(FactoryError::InvalidOffset)
        );
    }

    #[test]
    fn test_unknown_factory_tokens() {
        assert_eq!(FactoryCommand::parse(""), Err(FactoryError::Unknown));
        assert_eq!(FactoryCommand::parse("adjust_z_1"), Err(FactoryError::Unknown));
        assert_eq!(FactoryCommand::parse("adjust_x10"), Err(FactoryError::Unknown));
    }

    #[test]
    fn test_axis_index() {
        assert_eq!(Axis::Pan.index(), 0);
        assert_eq!(Axis::Tilt.index(), 1);
        assert_eq!(Axis::ALL, [Axis::Pan, Axis::Tilt]);
    }

    proptest! {
        #[test]
        fn prop_adjust_display_parses_back(delta in any::<i16>(), pan in any::<bool>()) {
            let axis = if pan { Axis::Pan } else { Axis::Tilt };
            let cmd = FactoryCommand::AdjustCenter { axis, delta };

            let mut text: heapless::String<32> = heapless::String::new();
            write!(text, "{}", cmd).unwrap();

            prop_assert_eq!(FactoryCommand::parse(&text), Ok(cmd));
        }
    }
}
