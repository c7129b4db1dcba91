//! GPIO capability
//!
//! Pins are addressed by number, the way a board config names them. A single
//! [`Gpio`] implementation owns every pin of the chip, and drivers borrow it
//! for the duration of each call.

/// Hardware pin identifier (GPIO number)
pub type PinId = u8;

/// Logical level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if this is the high level
    pub fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Check if this is the low level
    pub fn is_low(self) -> bool {
        !self.is_high()
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Raw output values follow the usual microcontroller convention:
/// zero drives the pin low, anything else drives it high.
impl From<u8> for Level {
    fn from(raw: u8) -> Self {
        Level::from(raw != 0)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

/// Electrical configuration of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Floating input, biased by external circuitry
    Input,
    /// Input with the chip's internal pull-up resistor enabled
    InputPullUp,
    /// Push-pull output
    Output,
}

/// Digital I/O capability
///
/// Implementations handle the actual register access for a specific chip.
/// All operations are infallible at this layer: addressing a pin that does
/// not exist is a caller contract violation, and its outcome is up to the
/// implementation.
pub trait Gpio {
    /// Configure a pin's direction and bias
    fn configure(&mut self, pin: PinId, mode: PinMode);

    /// Read the instantaneous level of an input pin
    ///
    /// Takes `&mut self` because some backends latch the input register on read.
    fn read(&mut self, pin: PinId) -> Level;

    /// Drive an output pin to the given level
    fn write(&mut self, pin: PinId, level: Level);
}

impl<G: Gpio + ?Sized> Gpio for &mut G {
    fn configure(&mut self, pin: PinId, mode: PinMode) {
        (**self).configure(pin, mode);
    }

    fn read(&mut self, pin: PinId) -> Level {
        (**self).read(pin)
    }

    fn write(&mut self, pin: PinId, level: Level) {
        (**self).write(pin, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_raw() {
        assert_eq!(Level::from(0u8), Level::Low);
        assert_eq!(Level::from(1u8), Level::High);
        // Any nonzero value counts as high
        assert_eq!(Level::from(0x80u8), Level::High);
        assert_eq!(Level::from(255u8), Level::High);
    }

    #[test]
    fn test_level_to_raw() {
        assert_eq!(u8::from(Level::Low), 0);
        assert_eq!(u8::from(Level::High), 1);
    }

    #[test]
    fn test_level_predicates() {
        assert!(Level::High.is_high());
        assert!(!Level::High.is_low());
        assert!(Level::Low.is_low());
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
    }
}
