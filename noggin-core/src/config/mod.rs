//! Head configuration
//!
//! Board-agnostic tuning for the pan/tilt head. The firmware embeds a
//! `head.toml` at build time and hands it to [`parse_config`]; anything
//! missing from the file keeps its default.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
