//! Runtime pin lookup
//!
//! Pin numbers come from the board file, so pins have to be handed out by
//! number at runtime instead of by field name.

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;

use pushme_hal::PinId;

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Move all 30 GPIO pins out of `Peripherals` into a [`PinBank`]
///
/// Only the `PIN_n` fields are moved; the remaining peripherals stay usable.
///
/// ```ignore
/// let p = embassy_rp::init(Default::default());
/// let mut bank = pin_bank!(p);
/// let uart = p.UART0; // still available
/// ```
#[macro_export]
macro_rules! pin_bank {
    ($p:ident) => {
        $crate::pins::PinBank::new([
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_0),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_1),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_2),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_3),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_4),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_5),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_6),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_7),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_8),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_9),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_10),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_11),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_12),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_13),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_14),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_15),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_16),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_17),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_18),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_19),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_20),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_21),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_22),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_23),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_24),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_25),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_26),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_27),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_28),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_29),
        ])
    };
}

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
}

/// Holds every GPIO pin until it is taken by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Create a bank from all 30 pins, see [`pin_bank!`]
    pub fn new(pins: [Peri<'static, AnyPin>; GPIO_COUNT]) -> Self {
        Self {
            pins: pins.map(Some),
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin: PinId) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(pin as usize)
            .ok_or(PinError::InvalidPin)?
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}
