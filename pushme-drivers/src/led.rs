//! Digital output latch
//!
//! Caches the last level written to the pin. The cache holds the raw value
//! the caller supplied, so any nonzero value reads back as "on", matching
//! how the hardware drives nonzero levels high.

use pushme_hal::{Gpio, Level, PinId, PinMode};

/// Canonical "on" level
const HIGH: u8 = 1;

/// Canonical "off" level
const LOW: u8 = 0;

/// LED on a single output pin
#[derive(Debug, Clone)]
pub struct Led {
    pin: PinId,
    level: u8,
}

impl Led {
    /// Create an LED, configure its pin as output and drive `initial` once
    pub fn new<G: Gpio>(gpio: &mut G, pin: PinId, initial: u8) -> Self {
        gpio.configure(pin, PinMode::Output);

        let mut led = Self { pin, level: initial };
        led.write(gpio, initial);
        led
    }

    /// Create an LED that starts off
    pub fn new_off<G: Gpio>(gpio: &mut G, pin: PinId) -> Self {
        Self::new(gpio, pin, LOW)
    }

    /// Check if the LED is lit (any nonzero cached level)
    pub fn is_on(&self) -> bool {
        self.level != LOW
    }

    pub fn is_off(&self) -> bool {
        !self.is_on()
    }

    pub fn turn_on<G: Gpio>(&mut self, gpio: &mut G) {
        self.write(gpio, HIGH);
    }

    pub fn turn_off<G: Gpio>(&mut self, gpio: &mut G) {
        self.write(gpio, LOW);
    }

    /// Turn the LED on if it is off, off otherwise
    pub fn toggle<G: Gpio>(&mut self, gpio: &mut G) {
        if self.is_off() {
            self.turn_on(gpio);
        } else {
            self.turn_off(gpio);
        }
    }

    /// Last raw level written
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    fn write<G: Gpio>(&mut self, gpio: &mut G, level: u8) {
        self.level = level;
        gpio.write(self.pin, Level::from(level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushme_hal::mock::MockBoard;

    const PIN: PinId = 25;

    #[test]
    fn test_new_configures_and_writes_once() {
        let mut board = MockBoard::new();
        let led = Led::new_off(&mut board, PIN);

        assert_eq!(board.mode(PIN), Some(PinMode::Output));
        assert_eq!(board.output(PIN), Some(Level::Low));
        assert_eq!(board.write_count(PIN), 1);
        assert!(led.is_off());
        assert_eq!(led.pin(), PIN);
    }

    #[test]
    fn test_initial_level_asymmetry() {
        let mut board = MockBoard::new();

        assert!(!Led::new(&mut board, 1, 0).is_on());
        assert!(Led::new(&mut board, 2, 1).is_on());

        let led = Led::new(&mut board, 3, 0x40);
        assert!(led.is_on());
        assert_eq!(led.level(), 0x40);
        assert_eq!(board.output(3), Some(Level::High));
    }

    #[test]
    fn test_turn_on_off() {
        let mut board = MockBoard::new();
        let mut led = Led::new_off(&mut board, PIN);

        led.turn_on(&mut board);
        assert!(led.is_on());
        assert_eq!(led.level(), 1);
        assert_eq!(board.output(PIN), Some(Level::High));

        led.turn_off(&mut board);
        assert!(led.is_off());
        assert_eq!(led.level(), 0);
        assert_eq!(board.output(PIN), Some(Level::Low));
        assert_eq!(board.write_count(PIN), 3);
    }

    #[test]
    fn test_toggle() {
        let mut board = MockBoard::new();

        for initial in [0u8, 1, 200] {
            let mut led = Led::new(&mut board, PIN, initial);
            let was_on = led.is_on();

            led.toggle(&mut board);
            assert_eq!(led.is_on(), !was_on);
            led.toggle(&mut board);
            assert_eq!(led.is_on(), was_on);
        }
    }

    #[test]
    fn test_toggle_normalizes_level() {
        let mut board = MockBoard::new();
        let mut led = Led::new(&mut board, PIN, 0x7f);

        led.toggle(&mut board);
        assert_eq!(led.level(), 0);
        led.toggle(&mut board);
        assert_eq!(led.level(), 1);
    }
}
