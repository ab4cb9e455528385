//! Noggin hardware abstraction traits
//!
//! Chip crates (`noggin-hal-rp2040`) implement these; `noggin-core` is
//! written against them so the head logic runs on the host under test.

#![no_std]
#![deny(unsafe_code)]

pub mod flash;

pub use flash::{FlashError, FlashStorage, StorageKey};
