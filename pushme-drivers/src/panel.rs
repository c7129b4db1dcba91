//! Board panel
//!
//! Owns every button and LED declared in a [`BoardConfig`] and turns one
//! polling pass over the buttons into a list of press/release edges. LEDs
//! bound to a button toggle on each of its presses.

use heapless::Vec;
use pushme_core::config::{BoardConfig, MAX_BUTTONS, MAX_LEDS};
use pushme_core::ButtonState;
use pushme_hal::{Gpio, Ticks};

use crate::button::Button;
use crate::led::Led;

/// Errors building a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// An LED is bound to a button that is not declared
    UnknownButton,
    /// More devices than the panel can hold
    TooManyDevices,
}

/// Button edge seen during a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelEvent {
    /// Button went down
    Pressed { button: usize },
    /// Button came back up after being held for `held_ms`
    Released { button: usize, held_ms: Ticks },
}

impl PanelEvent {
    /// Index of the button in declaration order
    pub fn button(&self) -> usize {
        match *self {
            PanelEvent::Pressed { button } | PanelEvent::Released { button, .. } => button,
        }
    }

    /// Check if this is a release after a hold of at least `threshold_ms`
    pub fn is_long_press(&self, threshold_ms: Ticks) -> bool {
        matches!(*self, PanelEvent::Released { held_ms, .. } if held_ms >= threshold_ms)
    }
}

/// LED with the index of the button that toggles it
#[derive(Debug, Clone)]
struct BoundLed {
    led: Led,
    button: Option<usize>,
}

/// All buttons and LEDs of a board
#[derive(Debug, Clone)]
pub struct Panel {
    buttons: Vec<Button, MAX_BUTTONS>,
    leds: Vec<BoundLed, MAX_LEDS>,
}

impl Panel {
    /// Build every device in the config, in declaration order
    ///
    /// Buttons are configured first, then each LED is configured and driven
    /// to its initial level.
    pub fn from_config<G: Gpio>(gpio: &mut G, config: &BoardConfig) -> Result<Self, PanelError> {
        let mut buttons = Vec::new();
        for b in &config.buttons {
            buttons
                .push(Button::new(gpio, b.pin, b.mode))
                .map_err(|_| PanelError::TooManyDevices)?;
        }

        let mut leds = Vec::new();
        for l in &config.leds {
            let button = match &l.button {
                Some(name) => Some(
                    config
                        .button_index(name)
                        .ok_or(PanelError::UnknownButton)?,
                ),
                None => None,
            };
            leds.push(BoundLed {
                led: Led::new(gpio, l.pin, l.initial),
                button,
            })
            .map_err(|_| PanelError::TooManyDevices)?;
        }

        Ok(Self { buttons, leds })
    }

    /// Probe every button once and report the edges
    ///
    /// Should be called at a steady cadence from the main loop.
    pub fn poll<G: Gpio>(&mut self, gpio: &mut G, now: Ticks) -> Vec<PanelEvent, MAX_BUTTONS> {
        let mut events = Vec::new();

        for (index, button) in self.buttons.iter_mut().enumerate() {
            let before = button.state();
            // A release after a clock wrap moves the press edge, so keep it
            let pressed_at = button.last_pressed_at();
            let after = button.probe(gpio, now);
            if before == after {
                continue;
            }

            let event = match after {
                ButtonState::Pressed => {
                    for bound in self.leds.iter_mut() {
                        if bound.button == Some(index) {
                            bound.led.toggle(gpio);
                        }
                    }
                    PanelEvent::Pressed { button: index }
                }
                ButtonState::Released => PanelEvent::Released {
                    button: index,
                    held_ms: button.last_released_at().wrapping_sub(pressed_at),
                },
            };

            // At most one edge per button, so this never overflows
            let _ = events.push(event);
        }

        events
    }

    pub fn button(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    pub fn led(&self, index: usize) -> Option<&Led> {
        self.leds.get(index).map(|b| &b.led)
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn led_count(&self) -> usize {
        self.leds.len()
    }
}
