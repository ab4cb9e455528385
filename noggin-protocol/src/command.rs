//! Command line parsing
//!
//! Parsing precedence, first match wins:
//! 1. A JSON batch object `{"actions": [..], "factory": ".."}`
//! 2. The whole line as one bare action token

use heapless::Vec;
use serde::Deserialize;

/// Maximum number of actions in one batch
pub const MAX_ACTIONS: usize = 16;

/// Wire shape of a batch object
#[derive(Deserialize)]
struct RawBatch<'a> {
    #[serde(borrow, default)]
    actions: Option<Vec<&'a str, MAX_ACTIONS>>,
    #[serde(borrow, default)]
    factory: Option<&'a str>,
}

/// A structured batch of actions plus an optional factory command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Batch<'a> {
    /// Action tokens, executed in order
    pub actions: Vec<&'a str, MAX_ACTIONS>,
    /// Factory token, executed after all actions
    pub factory: Option<&'a str>,
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Structured JSON batch
    Batch(Batch<'a>),
    /// Single bare action token
    Bare(&'a str),
}

impl<'a> Command<'a> {
    /// Parse a trimmed command line
    ///
    /// Never fails: anything that is not a well-formed batch object
    /// (including batches longer than [`MAX_ACTIONS`] or with escaped
    /// strings) becomes a bare token.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();

        if line.starts_with('{') {
            if let Ok((raw, _)) = serde_json_core::from_str::<RawBatch<'a>>(line) {
                return Command::Batch(Batch {
                    actions: raw.actions.unwrap_or_default(),
                    factory: raw.factory,
                });
            }
        }

        Command::Bare(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_token() {
        assert_eq!(Command::parse("eye_blink"), Command::Bare("eye_blink"));
        assert_eq!(Command::parse("  head_nod \r\n"), Command::Bare("head_nod"));
    }

    #[test]
    fn test_batch_with_actions() {
        let cmd = Command::parse(r#"{"actions": ["eye_blink", "head_nod"]}"#);
        let Command::Batch(batch) = cmd else {
            panic!("expected batch");
        };
        assert_eq!(batch.actions.as_slice(), &["eye_blink", "head_nod"]);
        assert_eq!(batch.factory, None);
    }

    #[test]
    fn test_batch_with_factory() {
        let cmd = Command::parse(r#"{"actions":["eye_blink","head_nod"],"factory":"reboot"}"#);
        let Command::Batch(batch) = cmd else {
            panic!("expected batch");
        };
        assert_eq!(batch.actions.len(), 2);
        assert_eq!(batch.factory, Some("reboot"));
    }

    #[test]
    fn test_factory_only() {
        let cmd = Command::parse(r#"{"factory": "adjust_x_-3"}"#);
        assert_eq!(
            cmd,
            Command::Batch(Batch {
                actions: Vec::new(),
                factory: Some("adjust_x_-3"),
            })
        );
    }

    #[test]
    fn test_empty_object() {
        let Command::Batch(batch) = Command::parse("{}") else {
            panic!("expected batch");
        };
        assert!(batch.actions.is_empty());
        assert_eq!(batch.factory, None);
    }

    #[test]
    fn test_malformed_json_falls_back_to_bare() {
        let line = r#"{"actions": ["eye_blink""#;
        assert_eq!(Command::parse(line), Command::Bare(line));
    }

    #[test]
    fn test_wrong_shape_falls_back_to_bare() {
        let line = r#"{"actions": "eye_blink"}"#;
        assert_eq!(Command::parse(line), Command::Bare(line));

        let line = r#"{"actions": [1, 2]}"#;
        assert_eq!(Command::parse(line), Command::Bare(line));
    }

    #[test]
    fn test_json_array_is_bare() {
        let line = r#"["eye_blink"]"#;
        assert_eq!(Command::parse(line), Command::Bare(line));
    }

    #[test]
    fn test_full_batch_fits_one_line() {
        let tokens = ["head_roll_right"; MAX_ACTIONS].map(|t| format!("\"{}\"", t));
        let line = format!(
            r#"{{"actions":[{}],"factory":"adjust_x_-32768"}}"#,
            tokens.join(",")
        );
        assert!(line.len() <= crate::MAX_LINE_LEN);

        let Command::Batch(batch) = Command::parse(&line) else {
            panic!("expected batch");
        };
        assert_eq!(batch.actions.len(), MAX_ACTIONS);
        assert_eq!(batch.factory, Some("adjust_x_-32768"));
    }

    #[test]
    fn test_too_many_actions_falls_back_to_bare() {
        let line = r#"{"actions":["a","a","a","a","a","a","a","a","a","a","a","a","a","a","a","a","a"]}"#;
        assert_eq!(Command::parse(line), Command::Bare(line));
    }
}
