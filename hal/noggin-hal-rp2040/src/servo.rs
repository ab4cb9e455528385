//! PWM hobby servo output
//!
//! One PWM slice channel per servo. The slice counter runs at 1 MHz so one
//! count is one microsecond, and wraps every 20 ms for the standard 50 Hz
//! servo frame. The compare value is the pulse width directly.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use noggin_core::traits::ServoOutput;

/// Servo frame period in microseconds (50 Hz)
pub const FRAME_US: u16 = 20_000;

/// Pulse width at 0 degrees
pub const MIN_PULSE_US: u16 = 500;

/// Pulse width at 180 degrees
pub const MAX_PULSE_US: u16 = 2_500;

/// Counter frequency, one tick per microsecond
const TICK_HZ: u32 = 1_000_000;

/// Convert an angle to a pulse width, clamping above 180 degrees
pub fn pulse_for(degrees: u8) -> u16 {
    let degrees = u32::from(degrees.min(180));
    let span = u32::from(MAX_PULSE_US - MIN_PULSE_US);
    MIN_PULSE_US + (degrees * span / 180) as u16
}

/// A servo on PWM channel A of a slice
pub struct PwmServo<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> PwmServo<'d> {
    /// Take over a PWM output and start the 50 Hz frame
    ///
    /// The output idles low until the first [`ServoOutput::set_angle`].
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let divider = (embassy_rp::clocks::clk_sys_freq() / TICK_HZ).clamp(1, 255) as u8;

        let mut config = PwmConfig::default();
        config.divider = divider.into();
        config.top = FRAME_US - 1;
        config.compare_a = 0;
        pwm.set_config(&config);

        Self { pwm, config }
    }
}

impl ServoOutput for PwmServo<'_> {
    fn set_angle(&mut self, degrees: u8) {
        self.config.compare_a = pulse_for(degrees);
        self.pwm.set_config(&self.config);
    }
}
