//! Noggin Command Protocol
//!
//! This crate defines the text command grammar accepted by the robot head,
//! whether it arrives from the BLE serial bridge or the debug console.
//!
//! # Protocol Overview
//!
//! Every command is one line of UTF-8 text (trimmed, at most
//! [`MAX_LINE_LEN`] bytes) in one of two shapes:
//!
//! ```text
//! eye_blink                                         bare action token
//! {"actions": ["eye_blink","head_nod"], "factory": "reboot"}
//! ```
//!
//! In the JSON shape both fields are optional; `actions` run in array
//! order and `factory` runs after them. Anything that is not a well-formed
//! batch object is treated as a single bare token.
//!
//! Factory commands are a privileged set used for calibration:
//! `reboot`, `adjust_x_<int>` and `adjust_y_<int>`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod action;
pub mod command;
pub mod factory;
pub mod line;

pub use action::{animation_exists, Action, Expression, Gesture, ANIMATION_COUNT, LOVE_ANIMATION};
pub use command::{Batch, Command, MAX_ACTIONS};
pub use factory::{Axis, FactoryCommand, FactoryError};
pub use line::{LineAssembler, LineError, MAX_LINE_LEN};

/// Longest action or factory token worth echoing back in a report
pub const MAX_TOKEN_LEN: usize = 32;
