//! PushMe Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the button and LED drivers
//! need from their environment. Chip-specific crates implement them; the
//! drivers only ever see the traits, so the same logic runs on an RP2040 or
//! against the in-memory fake on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (pushme-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pushme-drivers (Button, Led, Panel)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pushme-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  pushme-hal-  │       │  mock (host   │
//! │    rp2040     │       │    tests)     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::Gpio`] - Pin configuration, raw reads and writes
//! - [`time::Clock`] - Monotonic millisecond tick source

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use gpio::{Gpio, Level, PinId, PinMode};
pub use time::{Clock, Ticks};
