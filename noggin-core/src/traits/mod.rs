//! Hardware abstraction traits
//!
//! These traits define the interface between the head logic and the
//! board-specific servo and display implementations.

pub mod face;
pub mod servo;

pub use face::{Face, FaceError};
pub use servo::ServoOutput;
