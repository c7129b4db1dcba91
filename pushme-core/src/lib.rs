//! Board-agnostic core logic for PushMe
//!
//! This crate contains everything that does not touch hardware:
//!
//! - Button wiring polarity and logical press state
//! - Board configuration types and the board file parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod input;

pub use input::{ButtonMode, ButtonState};
