//! Polled push button
//!
//! The button keeps no "pressed" flag. It stores when it last saw a press
//! edge and when it last saw a release edge, and its state is whichever of
//! the two happened later. Callers build press-duration policies (long
//! press, hold to repeat, their own debounce window) on top of those two
//! timestamps.

use pushme_core::{ButtonMode, ButtonState};
use pushme_hal::{Clock, Gpio, PinId, Ticks};

/// Push button on a single input pin
#[derive(Debug, Clone)]
pub struct Button {
    pin: PinId,
    mode: ButtonMode,
    last_pressed_at: Ticks,
    last_released_at: Ticks,
}

impl Button {
    /// Create a button and configure its pin as an input
    ///
    /// Only [`ButtonMode::BuiltinPulledUp`] enables the internal pull-up.
    /// The button starts out released.
    pub fn new<G: Gpio>(gpio: &mut G, pin: PinId, mode: ButtonMode) -> Self {
        gpio.configure(pin, mode.pin_mode());

        Self {
            pin,
            mode,
            last_pressed_at: 0,
            last_released_at: 0,
        }
    }

    /// Create a button wired against an external pull-up
    pub fn pulled_up<G: Gpio>(gpio: &mut G, pin: PinId) -> Self {
        Self::new(gpio, pin, ButtonMode::default())
    }

    /// Sample the pin and return the button state
    ///
    /// When the sampled state differs from the current one, `now` is recorded
    /// as the time of the new edge. Probing again without a change leaves the
    /// timestamps alone.
    ///
    /// If `now` is not after the opposite edge because the clock wrapped, that
    /// edge is moved back to just before `now`. Edges landing in the same tick
    /// are spaced one tick apart.
    pub fn probe<G: Gpio>(&mut self, gpio: &mut G, now: Ticks) -> ButtonState {
        let sampled = self.read(gpio);

        if sampled != self.state() {
            match sampled {
                ButtonState::Pressed => self.record_press(now),
                ButtonState::Released => self.record_release(now),
            }
        }

        sampled
    }

    /// Store a press edge so that `last_pressed_at > last_released_at`
    fn record_press(&mut self, now: Ticks) {
        let released_at = self.last_released_at;

        if now > released_at {
            self.last_pressed_at = now;
        } else if released_at - now <= 1 && released_at < Ticks::MAX {
            // Several edges inside one tick
            self.last_pressed_at = released_at + 1;
        } else {
            // Clock wrapped since the last release: restart both edges at `now`
            self.last_pressed_at = now.max(1);
            self.last_released_at = self.last_pressed_at - 1;
        }
    }

    /// Store a release edge so that `last_released_at >= last_pressed_at`
    fn record_release(&mut self, now: Ticks) {
        let pressed_at = self.last_pressed_at;

        if now >= pressed_at {
            self.last_released_at = now;
        } else if pressed_at - now <= 1 {
            self.last_released_at = pressed_at;
        } else {
            // Clock wrapped while held
            self.last_pressed_at = now;
            self.last_released_at = now;
        }
    }

    /// Sample the pin, timestamping edges with `clock`
    pub fn probe_now<G: Gpio, C: Clock>(&mut self, gpio: &mut G, clock: &C) -> ButtonState {
        self.probe(gpio, clock.now())
    }

    /// State as of the last probe, without touching the pin
    pub fn state(&self) -> ButtonState {
        ButtonState::from_edges(self.last_pressed_at, self.last_released_at)
    }

    pub fn is_pressed(&self) -> bool {
        self.state().is_pressed()
    }

    pub fn is_released(&self) -> bool {
        self.state().is_released()
    }

    /// Time of the last press edge (0 if never pressed)
    pub fn last_pressed_at(&self) -> Ticks {
        self.last_pressed_at
    }

    /// Time of the last release edge (0 if never released)
    pub fn last_released_at(&self) -> Ticks {
        self.last_released_at
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    pub fn mode(&self) -> ButtonMode {
        self.mode
    }

    fn read<G: Gpio>(&self, gpio: &mut G) -> ButtonState {
        self.mode.state_for(gpio.read(self.pin))
    }
}
