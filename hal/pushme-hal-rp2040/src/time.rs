//! `Clock` implementation over the embassy time driver

use embassy_time::Instant;

use pushme_hal::{Clock, Ticks};

/// Milliseconds since boot, wrapping at `u32::MAX`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Ticks {
        // Truncation keeps the low 32 bits, i.e. a wrapping millisecond counter
        Instant::now().as_millis() as Ticks
    }
}
