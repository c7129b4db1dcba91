//! Button polarity and logical state
//!
//! A push button is wired either against a pull-up (pressing grounds the pin,
//! active-low) or a pull-down (pressing sources power to the pin,
//! active-high). Everything above this module speaks only in terms of
//! [`ButtonState`].

use pushme_hal::{Level, PinMode, Ticks};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a push button is wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ButtonMode {
    /// External pull-up resistor, button to ground
    #[default]
    PulledUp,
    /// Chip's internal pull-up, button to ground
    BuiltinPulledUp,
    /// External pull-down resistor, button to supply
    PulledDown,
}

impl ButtonMode {
    /// Pin configuration required by this wiring
    ///
    /// Only the built-in mode enables the internal pull-up; the others rely
    /// on external biasing.
    pub fn pin_mode(self) -> PinMode {
        match self {
            ButtonMode::BuiltinPulledUp => PinMode::InputPullUp,
            ButtonMode::PulledUp | ButtonMode::PulledDown => PinMode::Input,
        }
    }

    /// Map a raw pin level to the logical button state
    ///
    /// | mode                        | HIGH     | LOW      |
    /// |-----------------------------|----------|----------|
    /// | PulledUp / BuiltinPulledUp  | Released | Pressed  |
    /// | PulledDown                  | Pressed  | Released |
    pub fn state_for(self, level: Level) -> ButtonState {
        match (self, level) {
            (ButtonMode::PulledUp | ButtonMode::BuiltinPulledUp, Level::High) => {
                ButtonState::Released
            }
            (ButtonMode::PulledUp | ButtonMode::BuiltinPulledUp, Level::Low) => {
                ButtonState::Pressed
            }
            (ButtonMode::PulledDown, Level::High) => ButtonState::Pressed,
            (ButtonMode::PulledDown, Level::Low) => ButtonState::Released,
        }
    }
}

/// Logical state of a push button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ButtonState {
    Released,
    Pressed,
}

impl ButtonState {
    /// Derive the state from the last edge timestamps
    ///
    /// A button is pressed exactly when its last press is more recent than
    /// its last release.
    pub fn from_edges(last_pressed_at: Ticks, last_released_at: Ticks) -> Self {
        if last_pressed_at > last_released_at {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }

    pub fn is_pressed(self) -> bool {
        matches!(self, ButtonState::Pressed)
    }

    pub fn is_released(self) -> bool {
        !self.is_pressed()
    }
}
