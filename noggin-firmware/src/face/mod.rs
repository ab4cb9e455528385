//! OLED eye renderer
//!
//! Draws two block eyes on the SH1106 and implements the core `Face`
//! trait. Expressions are programmatic: eye size, horizontal gaze and an
//! eyelid cut for the mood. Blink, sleep and wake-up animate the eye
//! height over a few frames.
//!
//! The bitmap animation library is not part of this firmware; every
//! valid animation id plays the same procedural pulse.

pub mod sh1106;

use embassy_time::Timer;
use embedded_hal_async::i2c::I2c;

use noggin_core::traits::{Face, FaceError};
use noggin_protocol::{animation_exists, Expression};

use sh1106::{Sh1106, HEIGHT, WIDTH};

const EYE_SIZE: i32 = 36;
const SURPRISE_SIZE: i32 = 44;
const CLOSED_HEIGHT: i32 = 4;
const EYE_GAP: i32 = 16;
const GAZE_SHIFT: i32 = 20;

/// Height change per animation frame
const LID_STEP: i32 = 8;
const FRAME_MS: u64 = 15;

/// Pulses played for an animation
const PULSE_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mood {
    Neutral,
    Happy,
    Sad,
    Angry,
}

/// Geometry of both eyes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Eyes {
    gaze: i32,
    size: i32,
    height: i32,
    mood: Mood,
}

impl Eyes {
    const fn neutral() -> Self {
        Self {
            gaze: 0,
            size: EYE_SIZE,
            height: EYE_SIZE,
            mood: Mood::Neutral,
        }
    }
}

/// Eye display on an SH1106 OLED
pub struct OledFace<I2C> {
    display: Sh1106<I2C>,
    eyes: Eyes,
}

impl<I2C: I2c> OledFace<I2C> {
    pub fn new(display: Sh1106<I2C>) -> Self {
        Self {
            display,
            eyes: Eyes::neutral(),
        }
    }

    /// Initialize the panel and draw neutral eyes
    pub async fn init(&mut self) -> Result<(), FaceError> {
        self.display.init().await.map_err(|_| FaceError::Bus)?;
        self.render(Eyes::neutral()).await
    }

    async fn render(&mut self, eyes: Eyes) -> Result<(), FaceError> {
        self.eyes = eyes;
        self.display.clear();

        let center_x = WIDTH as i32 / 2 + eyes.gaze;
        let offset = (EYE_GAP + eyes.size) / 2;
        draw_eye(&mut self.display, center_x - offset, eyes, Side::Left);
        draw_eye(&mut self.display, center_x + offset, eyes, Side::Right);

        self.display.flush().await.map_err(|_| FaceError::Bus)
    }

    /// Animate the eye height toward `target`
    async fn animate_height(&mut self, target: i32) -> Result<(), FaceError> {
        let mut eyes = self.eyes;
        while eyes.height != target {
            eyes.height = if eyes.height < target {
                (eyes.height + LID_STEP).min(target)
            } else {
                (eyes.height - LID_STEP).max(target)
            };
            self.render(eyes).await?;
            Timer::after_millis(FRAME_MS).await;
        }
        Ok(())
    }

    async fn animate_size(&mut self, target: i32) -> Result<(), FaceError> {
        let mut eyes = self.eyes;
        while eyes.size != target {
            eyes.size = if eyes.size < target {
                (eyes.size + LID_STEP / 2).min(target)
            } else {
                (eyes.size - LID_STEP / 2).max(target)
            };
            eyes.height = eyes.size;
            self.render(eyes).await?;
            Timer::after_millis(FRAME_MS).await;
        }
        Ok(())
    }
}

impl<I2C: I2c> Face for OledFace<I2C> {
    async fn show(&mut self, expression: Expression) -> Result<(), FaceError> {
        let base = Eyes::neutral();

        match expression {
            Expression::Center => self.render(base).await,
            Expression::LookLeft => {
                self.render(Eyes {
                    gaze: -GAZE_SHIFT,
                    ..self.eyes
                })
                .await
            }
            Expression::LookRight => {
                self.render(Eyes {
                    gaze: GAZE_SHIFT,
                    ..self.eyes
                })
                .await
            }
            Expression::Happy => self.render(Eyes { mood: Mood::Happy, ..base }).await,
            Expression::Sad => self.render(Eyes { mood: Mood::Sad, ..base }).await,
            Expression::Anger => self.render(Eyes { mood: Mood::Angry, ..base }).await,
            Expression::Surprise => self.animate_size(SURPRISE_SIZE).await,
            Expression::Blink => {
                let open = self.eyes.height;
                self.animate_height(CLOSED_HEIGHT).await?;
                self.animate_height(open).await
            }
            Expression::Sleep => self.animate_height(CLOSED_HEIGHT).await,
            Expression::WakeUp => {
                let size = self.eyes.size;
                self.animate_height(size).await
            }
        }
    }

    async fn play_animation(&mut self, id: u8) -> Result<(), FaceError> {
        if !animation_exists(id) {
            return Err(FaceError::UnknownAnimation(id));
        }

        self.render(Eyes::neutral()).await?;
        for _ in 0..PULSE_COUNT {
            self.animate_size(SURPRISE_SIZE).await?;
            self.animate_size(EYE_SIZE).await?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn draw_eye<I2C: I2c>(display: &mut Sh1106<I2C>, center_x: i32, eyes: Eyes, side: Side) {
    let x = center_x - eyes.size / 2;
    let y = HEIGHT as i32 / 2 - eyes.height / 2;
    let (w, h) = (eyes.size, eyes.height);

    display.fill_rect(x, y, w, h, true);

    match eyes.mood {
        Mood::Neutral => {}
        // Cheek pushes up from below, leaving an arch
        Mood::Happy => display.fill_rect(x + 4, y + h / 2, w - 8, h, false),
        // Brow drops toward the outer corner
        Mood::Sad => cut_lid(display, x, y, w, h, side == Side::Left),
        // Brow drops toward the nose
        Mood::Angry => cut_lid(display, x, y, w, h, side == Side::Right),
    }
}

/// Clear a triangle off the top of an eye, deepest on the left or right
fn cut_lid<I2C: I2c>(display: &mut Sh1106<I2C>, x: i32, y: i32, w: i32, h: i32, from_left: bool) {
    let depth = h / 2;
    for row in 0..depth {
        let cut = (depth - row) * w / depth.max(1);
        let start = if from_left { x } else { x + w - cut };
        display.fill_rect(start, y + row, cut, 1, false);
    }
}
