//! Embedded configuration loader

use defmt::*;

use noggin_core::config::{parse_config, HeadConfig};

/// Embedded configuration (compiled into firmware)
/// Edit head.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../head.toml");

/// Parse the embedded configuration
///
/// build.rs validates head.toml, so failure here means the file and the
/// firmware reader disagree. The head still comes up on defaults.
pub fn load_head_config() -> HeadConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: pan {} +/-{}, tilt {} +/-{}, step {} deg / {}ms, demo {} every {}ms",
                config.pan.default_center,
                config.pan.offset,
                config.tilt.default_center,
                config.tilt.offset,
                config.motion.step_deg,
                config.motion.step_delay_ms,
                config.demo.enabled,
                config.demo.interval_ms
            );
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in defaults");
            HeadConfig::default()
        }
    }
}
