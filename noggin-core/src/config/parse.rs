//! Minimal TOML reader for `head.toml`
//!
//! Handles only the subset the head configuration needs:
//! - `[section]` headers
//! - `key = value` pairs with integer or boolean values
//! - Comments (`# ...`), whole-line or trailing
//!
//! Unknown keys are ignored so older firmware accepts newer files.
//! Unknown sections are rejected.

use super::types::{ConfigError, HeadConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor a key/value pair
    InvalidLine,
    /// Value could not be parsed for its key
    InvalidValue,
    /// File parsed but the values are unusable
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Motion,
    Pan,
    Tilt,
    Demo,
    Loop,
}

/// Parse `head.toml` into a validated [`HeadConfig`]
pub fn parse_config(input: &str) -> Result<HeadConfig, ParseError> {
    let mut config = HeadConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(name.trim())?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(name: &str) -> Result<Section, ParseError> {
    match name {
        "motion" => Ok(Section::Motion),
        "pan" => Ok(Section::Pan),
        "tilt" => Ok(Section::Tilt),
        "demo" => Ok(Section::Demo),
        "loop" => Ok(Section::Loop),
        _ => Err(ParseError::InvalidSection),
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut HeadConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Motion => match key {
            "step_deg" => config.motion.step_deg = parse_int(value)?,
            "step_delay_ms" => config.motion.step_delay_ms = parse_int(value)?,
            "gesture_pause_ms" => config.motion.gesture_pause_ms = parse_int(value)?,
            "nudge_deg" => config.motion.nudge_deg = parse_int(value)?,
            _ => {}
        },
        Section::Pan | Section::Tilt => {
            let axis = if section == Section::Pan {
                &mut config.pan
            } else {
                &mut config.tilt
            };
            match key {
                "default_center" => axis.default_center = parse_int(value)?,
                "offset" => axis.offset = parse_int(value)?,
                _ => {}
            }
        }
        Section::Demo => match key {
            "enabled" => config.demo.enabled = parse_bool(value)?,
            "interval_ms" => config.demo.interval_ms = parse_int(value)?,
            _ => {}
        },
        Section::Loop => {
            if key == "tick_ms" {
                config.tick_ms = parse_int(value)?;
            }
        }
        Section::Root => {}
    }

    Ok(())
}
