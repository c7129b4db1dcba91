//! Board configuration types
//!
//! These types describe which buttons and LEDs exist on a board, which pins
//! they sit on and how they are wired.

use heapless::{String, Vec};
use pushme_hal::PinId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::input::ButtonMode;

/// Maximum length of device names
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum buttons per board
pub const MAX_BUTTONS: usize = 8;

/// Maximum LEDs per board
pub const MAX_LEDS: usize = 8;

/// Number of user GPIOs a board file may name (`gpio0` to `gpio29`)
pub const GPIO_COUNT: PinId = 30;

/// Default button polling cadence
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 10;

/// Default threshold separating short from long presses
pub const DEFAULT_LONG_PRESS_MS: u32 = 800;

/// Push button configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Button name (e.g., "start", "mode")
    pub name: String<MAX_LABEL_LEN>,
    /// GPIO pin number
    pub pin: PinId,
    /// Wiring polarity
    pub mode: ButtonMode,
}

/// LED configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedConfig {
    /// LED name (e.g., "status")
    pub name: String<MAX_LABEL_LEN>,
    /// GPIO pin number
    pub pin: PinId,
    /// Raw level written at startup (0 = off, anything else = on)
    pub initial: u8,
    /// Button whose presses toggle this LED
    pub button: Option<String<MAX_LABEL_LEN>>,
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// How often the buttons are probed
    pub poll_interval_ms: u32,
    /// Presses held at least this long are reported as long presses
    pub long_press_ms: u32,
    pub buttons: Vec<ButtonConfig, MAX_BUTTONS>,
    pub leds: Vec<LedConfig, MAX_LEDS>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardConfig {
    /// Create an empty configuration with default timings
    pub fn new() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            buttons: Vec::new(),
            leds: Vec::new(),
        }
    }

    /// Find a button by name
    pub fn find_button(&self, name: &str) -> Option<&ButtonConfig> {
        self.buttons.iter().find(|b| b.name.as_str() == name)
    }

    /// Position of a button in declaration order
    pub fn button_index(&self, name: &str) -> Option<usize> {
        self.buttons.iter().position(|b| b.name.as_str() == name)
    }

    /// Find an LED by name
    pub fn find_led(&self, name: &str) -> Option<&LedConfig> {
        self.leds.iter().find(|l| l.name.as_str() == name)
    }

    /// Check whether any device already uses `pin`
    pub fn pin_in_use(&self, pin: PinId) -> bool {
        self.buttons.iter().any(|b| b.pin == pin) || self.leds.iter().any(|l| l.pin == pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> String<MAX_LABEL_LEN> {
        String::try_from(s).unwrap()
    }

    #[test]
    fn test_lookup() {
        let mut config = BoardConfig::new();
        config
            .buttons
            .push(ButtonConfig {
                name: label("start"),
                pin: 14,
                mode: ButtonMode::BuiltinPulledUp,
            })
            .unwrap();
        config
            .leds
            .push(LedConfig {
                name: label("status"),
                pin: 25,
                initial: 0,
                button: Some(label("start")),
            })
            .unwrap();

        assert_eq!(config.find_button("start").map(|b| b.pin), Some(14));
        assert_eq!(config.button_index("start"), Some(0));
        assert!(config.find_button("stop").is_none());
        assert_eq!(config.find_led("status").map(|l| l.pin), Some(25));

        assert!(config.pin_in_use(14));
        assert!(config.pin_in_use(25));
        assert!(!config.pin_in_use(3));
    }

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.long_press_ms, DEFAULT_LONG_PRESS_MS);
        assert!(config.buttons.is_empty());
        assert!(config.leds.is_empty());
    }
}
