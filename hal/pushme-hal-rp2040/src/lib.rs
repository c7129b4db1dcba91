//! RP2040 backend for PushMe
//!
//! Implements the `pushme-hal` capabilities on top of embassy-rp:
//!
//! - Runtime pin lookup by number, for config-driven pin assignment
//! - [`gpio::Rp2040Gpio`] - `Gpio` over dynamically configured `Flex` pins
//! - [`time::EmbassyClock`] - `Clock` over the embassy time driver

#![no_std]

pub mod gpio;
pub mod pins;
pub mod time;

pub use gpio::Rp2040Gpio;
pub use pins::{PinBank, PinError, GPIO_COUNT};
pub use time::EmbassyClock;
