//! Hobby servo output trait

/// A positional servo driven by angle
///
/// Implementations convert the angle into whatever the hardware wants
/// (typically a 500-2500 µs pulse at 50 Hz). Writes are fire-and-forget:
/// a servo has no feedback path.
pub trait ServoOutput {
    /// Command the servo to an absolute angle in degrees (0-180)
    fn set_angle(&mut self, degrees: u8);
}

