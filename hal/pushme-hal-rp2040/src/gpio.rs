//! `Gpio` implementation for the RP2040
//!
//! Claimed pins are wrapped in `Flex`, which can switch direction and bias
//! at runtime, so the same pin type serves buttons and LEDs.

use embassy_rp::gpio::{self, Flex, Pull};

use pushme_hal::{Gpio, Level, PinId, PinMode};

use crate::pins::{PinBank, PinError, GPIO_COUNT};

/// GPIO bank of claimed pins, addressed by GPIO number
pub struct Rp2040Gpio {
    pins: [Option<Flex<'static>>; GPIO_COUNT],
}

impl Default for Rp2040Gpio {
    fn default() -> Self {
        Self::new()
    }
}

impl Rp2040Gpio {
    /// Create a bank with no pins claimed
    pub fn new() -> Self {
        Self {
            pins: core::array::from_fn(|_| None),
        }
    }

    /// Take `pin` from the bank and make it available to drivers
    pub fn claim(&mut self, bank: &mut PinBank, pin: PinId) -> Result<(), PinError> {
        let slot = self
            .pins
            .get_mut(pin as usize)
            .ok_or(PinError::InvalidPin)?;
        if slot.is_some() {
            return Err(PinError::AlreadyTaken);
        }
        *slot = Some(Flex::new(bank.take(pin)?));
        Ok(())
    }

    fn flex(&mut self, pin: PinId) -> Option<&mut Flex<'static>> {
        let flex = self.pins.get_mut(pin as usize).and_then(Option::as_mut);
        if flex.is_none() {
            #[cfg(feature = "defmt")]
            defmt::warn!("gpio{} used without being claimed", pin);
        }
        flex
    }
}

impl Gpio for Rp2040Gpio {
    fn configure(&mut self, pin: PinId, mode: PinMode) {
        let Some(flex) = self.flex(pin) else {
            return;
        };
        match mode {
            PinMode::Input => {
                flex.set_pull(Pull::None);
                flex.set_as_input();
            }
            PinMode::InputPullUp => {
                flex.set_pull(Pull::Up);
                flex.set_as_input();
            }
            PinMode::Output => flex.set_as_output(),
        }
    }

    fn read(&mut self, pin: PinId) -> Level {
        // Unclaimed pins read low
        self.flex(pin)
            .map(|flex| Level::from(flex.is_high()))
            .unwrap_or(Level::Low)
    }

    fn write(&mut self, pin: PinId, level: Level) {
        if let Some(flex) = self.flex(pin) {
            flex.set_level(match level {
                Level::Low => gpio::Level::Low,
                Level::High => gpio::Level::High,
            });
        }
    }
}
