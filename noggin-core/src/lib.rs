//! Board-agnostic core logic for the Noggin robot head
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (servo output, face display)
//! - Head configuration and its TOML reader
//! - Persisted servo calibration
//! - Pan/tilt motion with scripted gestures
//! - Bounded command queues between receive tasks and the head loop
//! - Command routing and the idle demo cycle
//!
//! Nothing here logs. Operations return outcome values and the firmware
//! decides what to print.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod calibration;
pub mod config;
pub mod demo;
pub mod motion;
pub mod queue;
pub mod router;
pub mod traits;

#[cfg(test)]
mod testing;
