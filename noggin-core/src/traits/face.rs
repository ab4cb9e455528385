//! Face renderer trait

use core::future::Future;

use noggin_protocol::Expression;

/// Errors that can occur while drawing the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceError {
    /// Display bus transfer failed
    Bus,
    /// No bitmap stored for this animation id
    UnknownAnimation(u8),
}

/// Trait for the eye display
///
/// Expressions are drawn programmatically and may take a while when they
/// include an animation (blinks, sleepy eyes), so both methods are async.
pub trait Face {
    /// Draw an eye expression
    fn show(&mut self, expression: Expression) -> impl Future<Output = Result<(), FaceError>>;

    /// Play a bitmap animation by id
    fn play_animation(&mut self, id: u8) -> impl Future<Output = Result<(), FaceError>>;
}
