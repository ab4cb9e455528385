//! Head motion
//!
//! Pan/tilt positioning with per-axis bounds, stepwise interpolation and
//! the scripted gestures built on top of it.

pub mod axis;
pub mod controller;
pub mod gesture;
pub mod trajectory;

pub use axis::AxisState;
pub use controller::MotionController;
pub use gesture::{script, GestureStep, ScriptParams};
pub use trajectory::Trajectory;
