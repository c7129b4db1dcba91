//! In-memory hardware for host-side testing
//!
//! [`MockBoard`] records every configuration and write per pin and serves
//! reads from levels set by the test. [`MockClock`] is a manually advanced
//! tick counter.

use core::cell::Cell;

use crate::gpio::{Gpio, Level, PinId, PinMode};
use crate::time::{Clock, Ticks};

/// Number of pins modelled by the mock board
pub const MOCK_PIN_COUNT: usize = 32;

#[derive(Debug, Clone, Copy)]
struct MockPin {
    mode: Option<PinMode>,
    input: Level,
    output: Option<Level>,
    configures: u32,
    writes: u32,
}

impl MockPin {
    const fn new() -> Self {
        Self {
            mode: None,
            input: Level::Low,
            output: None,
            configures: 0,
            writes: 0,
        }
    }
}

/// Fake GPIO bank
#[derive(Debug, Clone)]
pub struct MockBoard {
    pins: [MockPin; MOCK_PIN_COUNT],
    reads: u32,
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBoard {
    /// Create a board with every pin unconfigured and reading low
    pub const fn new() -> Self {
        Self {
            pins: [MockPin::new(); MOCK_PIN_COUNT],
            reads: 0,
        }
    }

    /// Set the level the next reads of `pin` will return
    pub fn set_input(&mut self, pin: PinId, level: Level) {
        self.pins[pin as usize].input = level;
    }

    /// Last mode the pin was configured with
    pub fn mode(&self, pin: PinId) -> Option<PinMode> {
        self.pins[pin as usize].mode
    }

    /// Last level written to the pin, if any
    pub fn output(&self, pin: PinId) -> Option<Level> {
        self.pins[pin as usize].output
    }

    /// Number of times the pin was configured
    pub fn configure_count(&self, pin: PinId) -> u32 {
        self.pins[pin as usize].configures
    }

    /// Number of writes to the pin
    pub fn write_count(&self, pin: PinId) -> u32 {
        self.pins[pin as usize].writes
    }

    /// Total number of reads across all pins
    pub fn read_count(&self) -> u32 {
        self.reads
    }
}

impl Gpio for MockBoard {
    fn configure(&mut self, pin: PinId, mode: PinMode) {
        let p = &mut self.pins[pin as usize];
        p.mode = Some(mode);
        p.configures += 1;
    }

    fn read(&mut self, pin: PinId) -> Level {
        self.reads += 1;
        self.pins[pin as usize].input
    }

    fn write(&mut self, pin: PinId, level: Level) {
        let p = &mut self.pins[pin as usize];
        p.output = Some(level);
        p.writes += 1;
    }
}

/// Manually driven clock
#[derive(Debug, Default)]
pub struct MockClock {
    now: Cell<Ticks>,
}

impl MockClock {
    /// Create a clock reading `start`
    pub const fn new(start: Ticks) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to an absolute tick count
    pub fn set(&self, now: Ticks) {
        self.now.set(now);
    }

    /// Move forward by `ms`, wrapping like a hardware counter
    pub fn advance(&self, ms: Ticks) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for MockClock {
    fn now(&self) -> Ticks {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_records_configuration() {
        let mut board = MockBoard::new();
        assert_eq!(board.mode(3), None);

        board.configure(3, PinMode::InputPullUp);
        assert_eq!(board.mode(3), Some(PinMode::InputPullUp));
        assert_eq!(board.configure_count(3), 1);
    }

    #[test]
    fn test_board_reads_and_writes() {
        let mut board = MockBoard::new();
        assert_eq!(board.read(5), Level::Low);

        board.set_input(5, Level::High);
        assert_eq!(board.read(5), Level::High);
        assert_eq!(board.read_count(), 2);

        board.write(7, Level::High);
        assert_eq!(board.output(7), Some(Level::High));
        assert_eq!(board.write_count(7), 1);
        assert_eq!(board.output(8), None);
    }

    #[test]
    fn test_clock_wraps() {
        let clock = MockClock::new(Ticks::MAX - 1);
        clock.advance(3);
        assert_eq!(clock.now(), 1);

        clock.set(500);
        assert_eq!((&clock).now(), 500);
    }
}
