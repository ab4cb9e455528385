//! RP2040-specific HAL for the Noggin robot head
//!
//! This crate provides RP2040 implementations of the shared traits:
//!
//! - Flash storage driver (implements `noggin_hal::FlashStorage`)
//! - PWM hobby servo output (implements `noggin_core::traits::ServoOutput`)

#![no_std]

pub mod flash;
pub mod servo;

pub use noggin_hal::{FlashError, FlashStorage, StorageKey};
