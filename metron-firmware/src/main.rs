//! Metron - Analog Acquisition Firmware
//!
//! Main firmware binary for RP2040-based sensor boards: bring the board
//! to a known clock/interrupt configuration, then sample the
//! potentiometer channel forever.
//!
//! Named after the Greek "metron" (μέτρον) meaning "measure".

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_time::Timer;
use heapless::String;
use {defmt_rtt as _, panic_probe as _};

use metron_core::config::BoardConfig;
use metron_core::converter::AnalogConverter;
use metron_core::report;
use metron_core::system::System;
use metron_hal_rp2040::{ConverterBlock, InputMux, PortWindows, Primask};

/// Potentiometer input: channel 0 (GPIO26)
const POT_CHANNEL: u8 = 0;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    // Releases peripherals from reset and starts the ADC clock
    let p = embassy_rp::init(Default::default());
    info!("Metron firmware starting...");

    let mut system = System::new(Primask::new(), PortWindows::new(), BoardConfig::default());
    system.initialize();

    if let Some(warning) = system.clock_warning() {
        warn!("clock derivation: {}", warning);
    }
    info!("instruction clock: {} Hz", system.clock_frequency());

    let mut adc = AnalogConverter::new(ConverterBlock::new(), InputMux::new());
    adc.init();

    let mut out: String<256> = String::new();
    if report::write_report(&mut out, system.config(), system.clock()).is_ok() {
        info!("{}", out.as_str());
    }

    // Heartbeat LED on the Pico's GPIO25
    let mut led = Output::new(p.PIN_25, Level::Low);

    loop {
        match adc.read_single_blocking(POT_CHANNEL) {
            Ok(sample) => info!("channel {}: {}", POT_CHANNEL, sample),
            Err(err) => {
                warn!("conversion failed: {}", err);
                system.fault();
                Timer::after_millis(1000).await;
                // Documented recovery path out of the fault state
                system.initialize();
            }
        }

        led.toggle();
        Timer::after_millis(250).await;
    }
}
