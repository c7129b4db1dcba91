//! Panel polling task
//!
//! Probes every button at the configured cadence and logs the edges.
//! LED toggling happens inside the panel itself.

use defmt::*;
use embassy_time::{Duration, Ticker};

use pushme_core::config::BoardConfig;
use pushme_drivers::{Panel, PanelEvent};
use pushme_hal::Clock;
use pushme_hal_rp2040::{EmbassyClock, Rp2040Gpio};

/// Panel task - polls buttons forever
#[embassy_executor::task]
pub async fn panel_task(mut gpio: Rp2040Gpio, mut panel: Panel, config: &'static BoardConfig) {
    info!("Panel task started");

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(config.poll_interval_ms as u64));

    loop {
        ticker.next().await;

        for event in panel.poll(&mut gpio, clock.now()) {
            let name = config
                .buttons
                .get(event.button())
                .map(|b| b.name.as_str())
                .unwrap_or("?");

            match event {
                PanelEvent::Pressed { .. } => info!("'{}' pressed", name),
                PanelEvent::Released { held_ms, .. } => {
                    if event.is_long_press(config.long_press_ms) {
                        info!("'{}' long press ({}ms)", name, held_ms);
                    } else {
                        debug!("'{}' released after {}ms", name, held_ms);
                    }
                }
            }
        }
    }
}
