//! Build script for noggin-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates head.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Servo range in degrees
const SERVO_RANGE: std::ops::RangeInclusive<i64> = 0..=180;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate head.toml at compile time
///
/// The firmware parses the same file at boot with a small no_std reader;
/// catching mistakes here means a bad file never reaches the device.
fn validate_config() {
    println!("cargo:rerun-if-changed=head.toml");

    let config_path = Path::new("head.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: head.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds head.toml from the noggin-firmware          ║\n\
            ║  directory. Create one (an empty file uses all defaults).        ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read head.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in head.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_axis(&config, "pan", &mut errors);
    validate_axis(&config, "tilt", &mut errors);
    validate_motion(&config, &mut errors);
    validate_demo(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid head configuration                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=head.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only known sections, and only tables, at the top level
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if !["motion", "pan", "tilt", "demo", "loop"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("'{}' must be a [section]", name));
        }
    }
}

fn integer(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> Option<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        None => None,
        Some(toml::Value::Integer(v)) => Some(*v),
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

fn validate_axis(config: &toml::Value, axis: &str, errors: &mut Vec<String>) {
    if let Some(center) = integer(config, axis, "default_center", errors) {
        if !SERVO_RANGE.contains(&center) {
            errors.push(format!("[{}] default_center must be 0-180", axis));
        }
    }

    if let Some(offset) = integer(config, axis, "offset", errors) {
        if !(0..=180).contains(&offset) {
            errors.push(format!("[{}] offset must be 0-180", axis));
        }
    }
}

fn validate_motion(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(step) = integer(config, "motion", "step_deg", errors) {
        if !(1..=180).contains(&step) {
            errors.push("[motion] step_deg must be 1-180".to_string());
        }
    }

    for key in ["step_delay_ms", "gesture_pause_ms"] {
        if let Some(ms) = integer(config, "motion", key, errors) {
            if !(0..=10_000).contains(&ms) {
                errors.push(format!("[motion] {} must be 0-10000", key));
            }
        }
    }

    if let Some(nudge) = integer(config, "motion", "nudge_deg", errors) {
        if !(0..=180).contains(&nudge) {
            errors.push("[motion] nudge_deg must be 0-180".to_string());
        }
    }

    if let Some(tick) = integer(config, "loop", "tick_ms", errors) {
        if !(1..=1_000).contains(&tick) {
            errors.push("[loop] tick_ms must be 1-1000".to_string());
        }
    }
}

fn validate_demo(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(enabled) = config.get("demo").and_then(|d| d.get("enabled")) {
        if !enabled.is_bool() {
            errors.push("[demo] enabled must be true or false".to_string());
        }
    }

    if let Some(interval) = integer(config, "demo", "interval_ms", errors) {
        if interval < 100 {
            errors.push("[demo] interval_ms must be at least 100".to_string());
        }
    }
}
