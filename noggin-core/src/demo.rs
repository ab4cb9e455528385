//! Idle demo cycle
//!
//! While demo mode is on and nothing else is happening, the head steps
//! through every expression and then every bitmap animation, one step per
//! interval, wrapping back to the start.

use noggin_protocol::{Expression, ANIMATION_COUNT};

/// How long a glance is held before the eyes recenter (ms)
pub const GLANCE_HOLD_MS: u32 = 500;

/// Expressions shown before the animations, in order
const EXPRESSIONS: [DemoStep; 9] = [
    DemoStep::Expression(Expression::Happy),
    DemoStep::Expression(Expression::Sad),
    DemoStep::Expression(Expression::Anger),
    DemoStep::Expression(Expression::Surprise),
    DemoStep::Expression(Expression::Blink),
    DemoStep::Expression(Expression::Sleep),
    DemoStep::Expression(Expression::WakeUp),
    DemoStep::Glance(Expression::LookRight),
    DemoStep::Glance(Expression::LookLeft),
];

/// One step of the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DemoStep {
    /// Show an expression
    Expression(Expression),
    /// Look somewhere, hold, then recenter the eyes
    Glance(Expression),
    /// Play a bitmap animation, then recenter the eyes
    Animation(u8),
}

/// Timer-driven position in the demo sequence
#[derive(Debug, Clone)]
pub struct DemoCycle {
    index: usize,
    interval_ms: u64,
    last_ms: u64,
}

impl DemoCycle {
    /// Steps in one full cycle
    pub const LEN: usize = EXPRESSIONS.len() + ANIMATION_COUNT as usize;

    /// Start a cycle; the first step fires one interval after `now_ms`
    pub fn new(interval_ms: u32, now_ms: u64) -> Self {
        Self {
            index: 0,
            interval_ms: u64::from(interval_ms),
            last_ms: now_ms,
        }
    }

    /// Step at a position in the cycle
    pub fn step_at(index: usize) -> DemoStep {
        let index = index % Self::LEN;
        match EXPRESSIONS.get(index) {
            Some(step) => *step,
            // Bounded by ANIMATION_COUNT via LEN
            None => DemoStep::Animation((index - EXPRESSIONS.len()) as u8),
        }
    }

    /// Return the next step if the interval has elapsed
    pub fn poll(&mut self, now_ms: u64) -> Option<DemoStep> {
        if now_ms.saturating_sub(self.last_ms) < self.interval_ms {
            return None;
        }

        self.last_ms = now_ms;
        let step = Self::step_at(self.index);
        self.index = (self.index + 1) % Self::LEN;
        Some(step)
    }

    /// Push the next step a full interval out (after a command ran)
    pub fn defer(&mut self, now_ms: u64) {
        self.last_ms = now_ms;
    }
}
