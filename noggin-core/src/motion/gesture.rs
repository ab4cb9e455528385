//! Scripted head gestures
//!
//! Each gesture expands into a short list of relative moves, pauses and
//! returns to center. Relative moves are clamped per step by the axis
//! bounds, so a script may end somewhere other than where it started
//! when it runs close to a limit.

use heapless::Vec;
use noggin_protocol::Gesture;

use crate::config::HeadConfig;

/// Tilt swing of one nod (degrees)
pub const NOD_AMPLITUDE_DEG: i16 = 20;

/// Pan swing of a head shake, half each side (degrees)
pub const SHAKE_AMPLITUDE_DEG: i16 = 20;

/// Longest script (`Shake`)
pub const MAX_SCRIPT_LEN: usize = 10;

/// One step of a gesture script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureStep {
    /// Relative move by `(dx, dy)` degrees
    Move { dx: i16, dy: i16 },
    /// Hold still for the gesture pause
    Pause,
    /// Return to the calibrated center
    Center,
}

/// Geometry a script depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptParams {
    pub pan_offset: i16,
    pub tilt_offset: i16,
    pub nudge: i16,
}

impl ScriptParams {
    pub fn from_config(config: &HeadConfig) -> Self {
        Self {
            pan_offset: config.pan.offset,
            tilt_offset: config.tilt.offset,
            nudge: config.motion.nudge_deg,
        }
    }
}

/// Expand a gesture into its steps
pub fn script(gesture: Gesture, params: &ScriptParams) -> Vec<GestureStep, MAX_SCRIPT_LEN> {
    use GestureStep::{Center, Pause};

    let mv = |dx, dy| GestureStep::Move { dx, dy };
    let half_shake = SHAKE_AMPLITUDE_DEG / 2;

    match gesture {
        Gesture::Nod => steps(&[
            mv(0, NOD_AMPLITUDE_DEG),
            Pause,
            mv(0, -NOD_AMPLITUDE_DEG),
            Pause,
            mv(0, NOD_AMPLITUDE_DEG),
            Pause,
            mv(0, -NOD_AMPLITUDE_DEG),
            Pause,
        ]),
        Gesture::Shake => steps(&[
            mv(-half_shake, 0),
            Pause,
            mv(SHAKE_AMPLITUDE_DEG, 0),
            Pause,
            mv(-SHAKE_AMPLITUDE_DEG, 0),
            Pause,
            mv(SHAKE_AMPLITUDE_DEG, 0),
            Pause,
            mv(-half_shake, 0),
            Pause,
        ]),
        Gesture::RollLeft | Gesture::RollRight => {
            // Drop the chin, then trace a diamond around the lowered center
            let x = params.pan_offset;
            let half_y = params.tilt_offset / 2;
            let dir = if gesture == Gesture::RollLeft { -1 } else { 1 };
            steps(&[
                Center,
                mv(0, half_y + 5),
                mv(dir * x, -half_y),
                mv(-dir * x, -half_y),
                mv(-dir * x, half_y),
                mv(dir * x, half_y),
                Center,
            ])
        }
        Gesture::Center => steps(&[Center]),
        Gesture::Left => steps(&[mv(-params.nudge, 0)]),
        Gesture::Right => steps(&[mv(params.nudge, 0)]),
        Gesture::Up => steps(&[mv(0, -params.nudge)]),
        Gesture::Down => steps(&[mv(0, params.nudge)]),
    }
}

fn steps(list: &[GestureStep]) -> Vec<GestureStep, MAX_SCRIPT_LEN> {
    // Every script above fits in MAX_SCRIPT_LEN
    Vec::from_slice(list).unwrap_or_default()
}
