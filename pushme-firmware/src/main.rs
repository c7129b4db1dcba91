//! PushMe - button and LED firmware
//!
//! Main firmware binary for RP2040 boards. The buttons and LEDs are
//! described in `board.toml`, which is validated at build time and parsed
//! again at boot.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pushme_core::config::{parse_board, BoardConfig};
use pushme_drivers::Panel;
use pushme_hal_rp2040::{pin_bank, PinBank, PinError, Rp2040Gpio};

mod tasks;

/// Embedded board description (compiled into firmware)
/// Edit board.toml and rebuild to customize
const BOARD_CONFIG: &str = include_str!("../board.toml");

// Config must live forever for task references
static BOARD: StaticCell<BoardConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("PushMe firmware starting...");

    let p = embassy_rp::init(Default::default());
    let mut bank = pin_bank!(p);
    info!("Peripherals initialized");

    let config: &'static BoardConfig = BOARD.init(unwrap!(parse_board(BOARD_CONFIG)));
    info!(
        "Board config: {} buttons, {} leds, poll every {}ms",
        config.buttons.len(),
        config.leds.len(),
        config.poll_interval_ms
    );

    let mut gpio = Rp2040Gpio::new();
    unwrap!(claim_pins(&mut gpio, &mut bank, config));

    // Configures every pin and drives each LED to its initial level
    let panel = unwrap!(Panel::from_config(&mut gpio, config));
    for (button, b) in config.buttons.iter().enumerate() {
        info!("Button {} '{}' on gpio{} ({})", button, b.name.as_str(), b.pin, b.mode);
    }
    for l in &config.leds {
        info!("LED '{}' on gpio{} initial={}", l.name.as_str(), l.pin, l.initial);
    }

    spawner.spawn(tasks::panel_task(gpio, panel, config)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Claim the pin of every configured device
fn claim_pins(
    gpio: &mut Rp2040Gpio,
    bank: &mut PinBank,
    config: &BoardConfig,
) -> Result<(), PinError> {
    for b in &config.buttons {
        gpio.claim(bank, b.pin)?;
    }
    for l in &config.leds {
        gpio.claim(bank, l.pin)?;
    }
    Ok(())
}
