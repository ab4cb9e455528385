//! Command router
//!
//! Turns one command line into face, motion and calibration calls. The
//! router never logs and never resets the chip itself; it returns a
//! [`Report`] describing what happened and the caller decides how to log
//! it and whether to reboot.
//!
//! Batches run their actions strictly in array order and the factory
//! command last. A `reboot` stops the batch: nothing after it runs.

use embedded_hal_async::delay::DelayNs;
use heapless::{String, Vec};
use noggin_hal::FlashStorage;
use noggin_protocol::{
    Action, Command, Expression, FactoryCommand, FactoryError, MAX_ACTIONS, MAX_TOKEN_LEN,
};

use crate::calibration::{CalibrationStore, CenterAdjust, CenterLoad};
use crate::demo::{DemoStep, GLANCE_HOLD_MS};
use crate::motion::MotionController;
use crate::traits::{Face, FaceError, ServoOutput};

/// A token echoed back in a report, truncated to [`MAX_TOKEN_LEN`]
pub type Token = String<MAX_TOKEN_LEN>;

/// Room for every action of a full batch plus its factory command
pub const REPORT_CAPACITY: usize = MAX_ACTIONS + 1;

/// Result of one action or factory command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Action dispatched
    Performed(Action),
    /// Token outside the action vocabulary; nothing happened
    UnknownAction(Token),
    /// Face call failed; execution continued
    FaceFailed { action: Action, error: FaceError },
    /// Factory adjust applied (check `persisted` for the flash write)
    CenterAdjusted(CenterAdjust),
    /// Factory token rejected
    FactoryRejected { token: Token, error: FactoryError },
    /// Factory reboot requested; the caller must reset
    RebootRequested,
}

/// Everything that happened while executing one command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    outcomes: Vec<Outcome, REPORT_CAPACITY>,
    reboot: bool,
}

impl Report {
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// A reboot was requested and should happen now
    pub fn reboot_requested(&self) -> bool {
        self.reboot
    }

    /// Every outcome was a success
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|o| {
            matches!(
                o,
                Outcome::Performed(_)
                    | Outcome::RebootRequested
                    | Outcome::CenterAdjusted(CenterAdjust {
                        persisted: Ok(()),
                        ..
                    })
            )
        })
    }

    fn push(&mut self, outcome: Outcome) {
        if outcome == Outcome::RebootRequested {
            self.reboot = true;
        }
        // Capacity covers a full batch
        let _ = self.outcomes.push(outcome);
    }
}

/// Routes commands to the face, the motion controller and calibration
pub struct Router<E, S, D, F> {
    face: E,
    motion: MotionController<S, D>,
    calibration: CalibrationStore<F>,
}

impl<E, S, D, F> Router<E, S, D, F>
where
    E: Face,
    S: ServoOutput,
    D: DelayNs,
    F: FlashStorage,
{
    pub fn new(face: E, motion: MotionController<S, D>, calibration: CalibrationStore<F>) -> Self {
        Self {
            face,
            motion,
            calibration,
        }
    }

    /// Bring the head up: load calibration, attach the servos, center
    pub async fn boot(&mut self) -> [CenterLoad; 2] {
        let loads = self.calibration.load_all().await;
        for load in &loads {
            self.motion.set_center(load.axis, load.center);
        }
        self.motion.attach();
        self.motion.center().await;
        loads
    }

    pub fn face(&self) -> &E {
        &self.face
    }

    pub fn motion(&self) -> &MotionController<S, D> {
        &self.motion
    }

    pub fn calibration(&self) -> &CalibrationStore<F> {
        &self.calibration
    }

    /// Execute one command line to completion
    pub async fn execute(&mut self, line: &str) -> Report {
        let mut report = Report::default();

        match Command::parse(line) {
            Command::Bare(token) => {
                let outcome = self.run_token(token).await;
                report.push(outcome);
            }
            Command::Batch(batch) => {
                for token in batch.actions {
                    let outcome = self.run_token(token).await;
                    report.push(outcome);
                }
                if let Some(token) = batch.factory {
                    let outcome = self.run_factory(token).await;
                    report.push(outcome);
                }
            }
        }

        report
    }

    /// Run a single action
    pub async fn run_action(&mut self, action: Action) -> Outcome {
        let result = match action {
            Action::Expression(expression) => self.face.show(expression).await,
            Action::Animation(id) => self.face.play_animation(id).await,
            Action::Gesture(gesture) => {
                self.motion.perform(gesture).await;
                Ok(())
            }
        };

        match result {
            Ok(()) => Outcome::Performed(action),
            Err(error) => Outcome::FaceFailed { action, error },
        }
    }

    /// Run one demo step
    pub async fn run_demo(&mut self, step: DemoStep) -> Report {
        let mut report = Report::default();

        match step {
            DemoStep::Expression(expression) => {
                let outcome = self.run_action(Action::Expression(expression)).await;
                report.push(outcome);
            }
            DemoStep::Glance(expression) => {
                let outcome = self.run_action(Action::Expression(expression)).await;
                report.push(outcome);
                self.motion.pause(GLANCE_HOLD_MS).await;
                let outcome = self.run_action(Action::Expression(Expression::Center)).await;
                report.push(outcome);
            }
            DemoStep::Animation(id) => {
                let outcome = self.run_action(Action::Animation(id)).await;
                report.push(outcome);
                let outcome = self.run_action(Action::Expression(Expression::Center)).await;
                report.push(outcome);
            }
        }

        report
    }

    async fn run_token(&mut self, token: &str) -> Outcome {
        match Action::from_token(token) {
            Some(action) => self.run_action(action).await,
            None => Outcome::UnknownAction(truncate(token)),
        }
    }

    async fn run_factory(&mut self, token: &str) -> Outcome {
        match FactoryCommand::parse(token) {
            Ok(FactoryCommand::Reboot) => Outcome::RebootRequested,
            Ok(FactoryCommand::AdjustCenter { axis, delta }) => {
                let adjust = self.calibration.adjust(axis, delta).await;
                self.motion.set_center(axis, adjust.center);
                self.motion.center().await;
                Outcome::CenterAdjusted(adjust)
            }
            Err(error) => Outcome::FactoryRejected {
                token: truncate(token),
                error,
            },
        }
    }
}

/// Copy at most [`MAX_TOKEN_LEN`] bytes, cut on a char boundary
fn truncate(text: &str) -> Token {
    let mut end = text.len().min(MAX_TOKEN_LEN);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut token = Token::new();
    let _ = token.push_str(&text[..end]);
    token
}
