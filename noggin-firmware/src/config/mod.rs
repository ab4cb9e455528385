//! Configuration loading
//!
//! The head configuration is `head.toml`, embedded at build time and
//! parsed by `noggin_core::config::parse_config`.

pub mod loader;

pub use loader::load_head_config;
