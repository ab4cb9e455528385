//! Pan/tilt motion controller
//!
//! Owns both servos and their axis state. Every move is interpolated in
//! `step_deg` increments with a delay between writes, so a move of N
//! degrees takes roughly N * delay. The delay defaults to the configured
//! `step_delay_ms`; the `_at` variants take it per call. Moves are async:
//! other tasks (the receive loops in particular) keep running during a
//! gesture.

use embedded_hal_async::delay::DelayNs;
use noggin_protocol::{Axis, Gesture};

use super::axis::AxisState;
use super::gesture::{script, GestureStep, ScriptParams};
use super::trajectory::Trajectory;
use crate::config::{HeadConfig, MotionConfig};
use crate::traits::ServoOutput;

/// Controller for the two head servos
pub struct MotionController<S, D> {
    pan: AxisState,
    tilt: AxisState,
    pan_servo: S,
    tilt_servo: S,
    delay: D,
    timing: MotionConfig,
    params: ScriptParams,
}

impl<S: ServoOutput, D: DelayNs> MotionController<S, D> {
    /// Create a controller at the configured default centers
    ///
    /// Nothing is written to the servos until [`Self::attach`].
    pub fn new(pan_servo: S, tilt_servo: S, delay: D, config: &HeadConfig) -> Self {
        Self {
            pan: AxisState::new(&config.pan),
            tilt: AxisState::new(&config.tilt),
            pan_servo,
            tilt_servo,
            delay,
            timing: config.motion,
            params: ScriptParams::from_config(config),
        }
    }

    /// Drive both servos to the current position
    pub fn attach(&mut self) {
        self.pan_servo.set_angle(to_servo(self.pan.current()));
        self.tilt_servo.set_angle(to_servo(self.tilt.current()));
    }

    /// Current `(pan, tilt)` position
    pub fn position(&self) -> (i16, i16) {
        (self.pan.current(), self.tilt.current())
    }

    /// State of one axis
    pub fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::Pan => &self.pan,
            Axis::Tilt => &self.tilt,
        }
    }

    /// Servo driving one axis
    pub fn servo(&self, axis: Axis) -> &S {
        match axis {
            Axis::Pan => &self.pan_servo,
            Axis::Tilt => &self.tilt_servo,
        }
    }

    /// Move an axis center and recompute its bounds
    ///
    /// Does not move the head; follow with [`Self::center`], which walks
    /// back inside the new bounds step by step.
    pub fn set_center(&mut self, axis: Axis, center: i16) {
        match axis {
            Axis::Pan => self.pan.set_center(center),
            Axis::Tilt => self.tilt.set_center(center),
        }
    }

    /// Plan a relative move from the current position
    pub fn plan(&self, dx: i16, dy: i16) -> Trajectory {
        self.plan_to((self.pan.target_for(dx), self.tilt.target_for(dy)))
    }

    fn plan_to(&self, target: (i16, i16)) -> Trajectory {
        let target = (self.pan.clamp(target.0), self.tilt.clamp(target.1));
        Trajectory::new(self.position(), target, self.timing.step_deg)
    }

    /// Move by `(dx, dy)` degrees, clamped to the axis bounds
    ///
    /// Returns the final position.
    pub async fn move_by(&mut self, dx: i16, dy: i16) -> (i16, i16) {
        self.move_by_at(dx, dy, self.timing.step_delay_ms).await
    }

    /// [`Self::move_by`] with `step_delay_ms` between servo writes
    pub async fn move_by_at(&mut self, dx: i16, dy: i16, step_delay_ms: u32) -> (i16, i16) {
        let trajectory = self.plan(dx, dy);
        self.follow(trajectory, step_delay_ms).await
    }

    /// Return smoothly to the calibrated center
    pub async fn center(&mut self) -> (i16, i16) {
        self.center_at(self.timing.step_delay_ms).await
    }

    /// [`Self::center`] with `step_delay_ms` between servo writes
    pub async fn center_at(&mut self, step_delay_ms: u32) -> (i16, i16) {
        let trajectory = self.plan_to((self.pan.center(), self.tilt.center()));
        self.follow(trajectory, step_delay_ms).await
    }

    /// Hold still for `ms` milliseconds
    pub async fn pause(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }

    /// Run a scripted gesture to completion
    pub async fn perform(&mut self, gesture: Gesture) -> (i16, i16) {
        for step in script(gesture, &self.params) {
            match step {
                GestureStep::Move { dx, dy } => {
                    self.move_by(dx, dy).await;
                }
                GestureStep::Pause => self.pause(self.timing.gesture_pause_ms).await,
                GestureStep::Center => {
                    self.center().await;
                }
            }
        }
        self.position()
    }

    async fn follow(&mut self, trajectory: Trajectory, step_delay_ms: u32) -> (i16, i16) {
        for (x, y) in trajectory {
            if x != self.pan.current() {
                self.pan.set_current(x);
                self.pan_servo.set_angle(to_servo(x));
            }
            if y != self.tilt.current() {
                self.tilt.set_current(y);
                self.tilt_servo.set_angle(to_servo(y));
            }
            self.delay.delay_ms(step_delay_ms).await;
        }
        self.position()
    }
}

/// Positions are kept inside the servo range, so this never truncates
fn to_servo(angle: i16) -> u8 {
    angle.clamp(0, u8::MAX as i16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingDelay, RecordingServo};
    use embassy_futures::block_on;
    use proptest::prelude::*;

    fn controller(config: &HeadConfig) -> MotionController<RecordingServo, CountingDelay> {
        MotionController::new(
            RecordingServo::default(),
            RecordingServo::default(),
            CountingDelay::default(),
            config,
        )
    }

    #[test]
    fn test_attach_writes_centers() {
        let mut head = controller(&HeadConfig::default());
        head.attach();
        assert_eq!(head.servo(Axis::Pan).last(), Some(90));
        assert_eq!(head.servo(Axis::Tilt).last(), Some(90));
    }

    #[test]
    fn test_move_by_steps_and_delays() {
        let config = HeadConfig::default();
        let delay = CountingDelay::default();
        let mut head = MotionController::new(
            RecordingServo::default(),
            RecordingServo::default(),
            delay.clone(),
            &config,
        );

        let end = block_on(head.move_by(10, 0));
        assert_eq!(end, (100, 90));
        assert_eq!(head.servo(Axis::Pan).count(), 10);
        assert_eq!(head.servo(Axis::Tilt).count(), 0);
        assert_eq!(delay.total_ms(), 10 * u64::from(config.motion.step_delay_ms));
    }

    #[test]
    fn test_move_by_clamps_to_bounds() {
        let mut head = controller(&HeadConfig::default());
        assert_eq!(block_on(head.move_by(100, -100)), (130, 60));
        assert_eq!(head.servo(Axis::Pan).last(), Some(130));
        assert_eq!(head.servo(Axis::Tilt).last(), Some(60));
    }

    #[test]
    fn test_center_is_idempotent() {
        let mut head = controller(&HeadConfig::default());
        block_on(head.move_by(12, 7));
        assert_eq!(block_on(head.center()), (90, 90));

        let writes = head.servo(Axis::Pan).count() + head.servo(Axis::Tilt).count();
        assert_eq!(block_on(head.center()), (90, 90));
        let again = head.servo(Axis::Pan).count() + head.servo(Axis::Tilt).count();
        assert_eq!(writes, again);
    }

    #[test]
    fn test_set_center_moves_bounds_not_head() {
        let mut head = controller(&HeadConfig::default());
        head.set_center(Axis::Pan, 100);
        assert_eq!(head.position(), (90, 90));
        assert_eq!(head.axis(Axis::Pan).max(), 140);

        assert_eq!(block_on(head.center()), (100, 90));
    }

    #[test]
    fn test_move_by_at_uses_given_delay() {
        let config = HeadConfig::default();
        let delay = CountingDelay::default();
        let mut head = MotionController::new(
            RecordingServo::default(),
            RecordingServo::default(),
            delay.clone(),
            &config,
        );

        assert_eq!(block_on(head.move_by_at(0, -12, 10)), (90, 78));
        assert_eq!(delay.total_ms(), 12 * 10);

        assert_eq!(block_on(head.center_at(2)), (90, 90));
        assert_eq!(delay.total_ms(), 12 * 10 + 12 * 2);
    }

    #[test]
    fn test_center_after_set_center_walks_in_steps() {
        let mut head = controller(&HeadConfig::default());
        block_on(head.move_by(0, 30));
        assert_eq!(head.position(), (90, 120));

        head.set_center(Axis::Tilt, 50);
        assert_eq!(head.position(), (90, 120));
        assert_eq!(block_on(head.center()), (90, 50));

        let angles = head.servo(Axis::Tilt).angles.borrow().clone();
        let step = HeadConfig::default().motion.step_deg as u8;
        for pair in angles.windows(2) {
            assert!(pair[0].abs_diff(pair[1]) <= step, "jump {:?}", pair);
        }
        assert_eq!(angles.last(), Some(&50));
    }

    #[test]
    fn test_nod_returns_to_start_tilt() {
        let mut head = controller(&HeadConfig::default());
        let end = block_on(head.perform(Gesture::Nod));
        assert_eq!(end, (90, 90));
        assert_eq!(head.servo(Axis::Pan).count(), 0);
        assert_eq!(head.servo(Axis::Tilt).last(), Some(90));
    }

    #[test]
    fn test_nod_pauses_between_segments() {
        let config = HeadConfig::default();
        let delay = CountingDelay::default();
        let mut head = MotionController::new(
            RecordingServo::default(),
            RecordingServo::default(),
            delay.clone(),
            &config,
        );

        block_on(head.perform(Gesture::Nod));
        let moving = 4 * 20 * u64::from(config.motion.step_delay_ms);
        let pausing = 4 * u64::from(config.motion.gesture_pause_ms);
        assert_eq!(delay.total_ms(), moving + pausing);
    }

    #[test]
    fn test_roll_ends_at_center() {
        let mut head = controller(&HeadConfig::default());
        block_on(head.move_by(5, 5));
        assert_eq!(block_on(head.perform(Gesture::RollLeft)), (90, 90));
        assert_eq!(block_on(head.perform(Gesture::RollRight)), (90, 90));
    }

    #[test]
    fn test_nudge_near_limit() {
        let mut head = controller(&HeadConfig::default());
        block_on(head.move_by(35, 0));
        assert_eq!(block_on(head.perform(Gesture::Right)), (130, 90));
    }

    proptest! {
        #[test]
        fn prop_move_lands_on_clamped_target(dx in -200i16..=200, dy in -200i16..=200) {
            let mut head = controller(&HeadConfig::default());
            let (x, y) = block_on(head.move_by(dx, dy));

            prop_assert_eq!(x, (90 + dx).clamp(50, 130));
            prop_assert_eq!(y, (90 + dy).clamp(60, 120));
            if x != 90 {
                prop_assert_eq!(head.servo(Axis::Pan).last(), Some(x as u8));
            }
            if y != 90 {
                prop_assert_eq!(head.servo(Axis::Tilt).last(), Some(y as u8));
            }
        }
    }
}
