//! Action vocabulary
//!
//! Maps bare action tokens to tagged action variants. The mapping is a
//! single static table so adding an action means adding one arm here and
//! one in [`Action::fmt`].

use core::fmt;

/// Number of numbered bitmap animations (ids `0..ANIMATION_COUNT`)
pub const ANIMATION_COUNT: u8 = 41;

/// Animation id played for the `love` token
///
/// Stored after the numbered set, so the demo cycle never plays it.
pub const LOVE_ANIMATION: u8 = ANIMATION_COUNT;

/// Check if the face asset library has an animation with this id
pub const fn animation_exists(id: u8) -> bool {
    id < ANIMATION_COUNT || id == LOVE_ANIMATION
}

/// Prefix for playing an animation by numeric id (`anim_12`)
const ANIMATION_PREFIX: &str = "anim_";

/// Programmatic eye expressions drawn by the face renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Expression {
    Blink,
    Happy,
    Sad,
    LookLeft,
    LookRight,
    /// Eyes back to the neutral position
    Center,
    Anger,
    Surprise,
    Sleep,
    WakeUp,
}

/// Scripted head motions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Two tilt dips
    Nod,
    /// Side-to-side pan
    Shake,
    RollLeft,
    RollRight,
    /// Return to the calibrated center
    Center,
    /// Single pan/tilt nudges by the configured amount
    Left,
    Right,
    Up,
    Down,
}

/// A single dispatchable action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    Expression(Expression),
    Gesture(Gesture),
    /// Play a bitmap animation by id
    Animation(u8),
}

impl Action {
    /// Look up a bare token
    ///
    /// Matching is exact and case-sensitive. Returns `None` for anything
    /// outside the vocabulary.
    pub fn from_token(token: &str) -> Option<Self> {
        use Expression as E;
        use Gesture as G;

        let action = match token {
            "eye_blink" => Action::Expression(E::Blink),
            "eye_happy" => Action::Expression(E::Happy),
            "eye_sad" => Action::Expression(E::Sad),
            "eye_left" => Action::Expression(E::LookLeft),
            "eye_right" => Action::Expression(E::LookRight),
            "eye_center" => Action::Expression(E::Center),
            "eye_anger" => Action::Expression(E::Anger),
            "eye_surprise" => Action::Expression(E::Surprise),
            "eye_sleep" => Action::Expression(E::Sleep),
            "eye_wakeup" => Action::Expression(E::WakeUp),
            "head_nod" => Action::Gesture(G::Nod),
            "head_shake" => Action::Gesture(G::Shake),
            "head_roll_left" => Action::Gesture(G::RollLeft),
            "head_roll_right" => Action::Gesture(G::RollRight),
            "head_center" => Action::Gesture(G::Center),
            "head_left" => Action::Gesture(G::Left),
            "head_right" => Action::Gesture(G::Right),
            "head_up" => Action::Gesture(G::Up),
            "head_down" => Action::Gesture(G::Down),
            "love" => Action::Animation(LOVE_ANIMATION),
            other => return parse_animation(other),
        };

        Some(action)
    }
}

/// Parse `anim_<id>`
fn parse_animation(token: &str) -> Option<Action> {
    let digits = token.strip_prefix(ANIMATION_PREFIX)?;
    // u8::from_str accepts a leading '+', the grammar does not
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u8>().ok().map(Action::Animation)
}

impl fmt::Display for Action {
    /// Writes the canonical token for this action
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expression as E;
        use Gesture as G;

        let token = match self {
            Action::Expression(E::Blink) => "eye_blink",
            Action::Expression(E::Happy) => "eye_happy",
            Action::Expression(E::Sad) => "eye_sad",
            Action::Expression(E::LookLeft) => "eye_left",
            Action::Expression(E::LookRight) => "eye_right",
            Action::Expression(E::Center) => "eye_center",
            Action::Expression(E::Anger) => "eye_anger",
            Action::Expression(E::Surprise) => "eye_surprise",
            Action::Expression(E::Sleep) => "eye_sleep",
            Action::Expression(E::WakeUp) => "eye_wakeup",
            Action::Gesture(G::Nod) => "head_nod",
            Action::Gesture(G::Shake) => "head_shake",
            Action::Gesture(G::RollLeft) => "head_roll_left",
            Action::Gesture(G::RollRight) => "head_roll_right",
            Action::Gesture(G::Center) => "head_center",
            Action::Gesture(G::Left) => "head_left",
            Action::Gesture(G::Right) => "head_right",
            Action::Gesture(G::Up) => "head_up",
            Action::Gesture(G::Down) => "head_down",
            Action::Animation(LOVE_ANIMATION) => "love",
            Action::Animation(id) => return write!(f, "{}{}", ANIMATION_PREFIX, id),
        };

        f.write_str(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    fn token_of(action: Action) -> String<32> {
        let mut s = String::new();
        write!(s, "{}", action).unwrap();
        s
    }

    #[test]
    fn test_expression_tokens() {
        assert_eq!(
            Action::from_token("eye_blink"),
            Some(Action::Expression(Expression::Blink))
        );
        assert_eq!(
            Action::from_token("eye_left"),
            Some(Action::Expression(Expression::LookLeft))
        );
        assert_eq!(
            Action::from_token("eye_right"),
            Some(Action::Expression(Expression::LookRight))
        );
    }

    #[test]
    fn test_motion_tokens() {
        assert_eq!(
            Action::from_token("head_nod"),
            Some(Action::Gesture(Gesture::Nod))
        );
        assert_eq!(
            Action::from_token("head_shake"),
            Some(Action::Gesture(Gesture::Shake))
        );
    }

    #[test]
    fn test_love_is_animation() {
        assert_eq!(
            Action::from_token("love"),
            Some(Action::Animation(LOVE_ANIMATION))
        );
        assert!(animation_exists(LOVE_ANIMATION));
        assert!(LOVE_ANIMATION >= ANIMATION_COUNT);
    }

    #[test]
    fn test_animation_exists() {
        assert!(animation_exists(0));
        assert!(animation_exists(40));
        assert!(animation_exists(41));
        assert!(!animation_exists(42));
        assert!(!animation_exists(255));
    }

    #[test]
    fn test_animation_by_id() {
        assert_eq!(Action::from_token("anim_0"), Some(Action::Animation(0)));
        assert_eq!(Action::from_token("anim_17"), Some(Action::Animation(17)));
        assert_eq!(Action::from_token("anim_255"), Some(Action::Animation(255)));
        assert_eq!(Action::from_token("anim_256"), None);
        assert_eq!(Action::from_token("anim_"), None);
        assert_eq!(Action::from_token("anim_+3"), None);
        assert_eq!(Action::from_token("anim_x"), None);
    }

    #[test]
    fn test_unknown_tokens() {
        assert_eq!(Action::from_token("fly"), None);
        assert_eq!(Action::from_token(""), None);
        assert_eq!(Action::from_token("EYE_BLINK"), None);
        assert_eq!(Action::from_token(" eye_blink"), None);
    }

    #[test]
    fn test_display_round_trip() {
        let tokens = [
            "eye_blink",
            "eye_happy",
            "eye_sad",
            "eye_left",
            "eye_right",
            "eye_center",
            "eye_anger",
            "eye_surprise",
            "eye_sleep",
            "eye_wakeup",
            "head_nod",
            "head_shake",
            "head_roll_left",
            "head_roll_right",
            "head_center",
            "head_left",
            "head_right",
            "head_up",
            "head_down",
            "love",
            "anim_3",
        ];

        for token in tokens {
            let action = Action::from_token(token).unwrap();
            assert_eq!(token_of(action).as_str(), token);
        }
    }
}
