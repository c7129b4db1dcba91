//! Device drivers
//!
//! Concrete drivers built on the `pushme-hal` capabilities:
//!
//! - [`Button`] - polled push button with edge timestamps
//! - [`Led`] - digital output latch with on/off/toggle
//! - [`Panel`] - the set of buttons and LEDs described by a board config
//!
//! Drivers never own the hardware. Each call borrows the [`pushme_hal::Gpio`]
//! implementation, so any number of devices can share one GPIO bank.

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod led;
pub mod panel;

pub use button::Button;
pub use led::Led;
pub use panel::{Panel, PanelError, PanelEvent};
