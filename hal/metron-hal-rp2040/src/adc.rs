//! ADC block capabilities
//!
//! RP2040 has a single 12-bit SAR ADC with 5 inputs:
//! - Channel 0: GPIO26
//! - Channel 1: GPIO27
//! - Channel 2: GPIO28
//! - Channel 3: GPIO29
//! - Channel 4: Internal temperature sensor
//!
//! The block fuses acquisition and conversion into one `START_ONCE`
//! trigger and fixes the sample window in hardware, so the capability
//! mapping is looser than on parts with a manual sample gate: the gate
//! release is what launches the one-shot, and the acquisition-tap setting
//! governs only the driver-side hold.

use embassy_rp::pac;
use metron_hal::{ChannelMux, ConverterControl, SampleTiming};

/// First GPIO routed to the ADC
pub const FIRST_ANALOG_PIN: u8 = 26;

/// Selectable inputs, including the temperature sensor
pub const ANALOG_CHANNELS: u8 = 5;

/// Mux position of the internal temperature sensor
pub const TEMP_CHANNEL: u8 = 4;

/// Control/status surface of the ADC block
///
/// Create one instance per firmware; the block is a singleton and this
/// type does nothing to police aliasing.
pub struct ConverterBlock {
    _private: (),
}

impl ConverterBlock {
    /// Take the ADC block, floating the analog pads
    ///
    /// Digital input buffers are disabled and pulls released on GPIO26-29
    /// so the pads read cleanly.
    pub fn new() -> Self {
        for pin in FIRST_ANALOG_PIN..FIRST_ANALOG_PIN + 4 {
            pac::PADS_BANK0.gpio(pin as usize).modify(|w| {
                w.set_ie(false);
                w.set_od(true);
                w.set_pue(false);
                w.set_pde(false);
            });
        }
        Self { _private: () }
    }
}

impl Default for ConverterBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterControl for ConverterBlock {
    fn set_enabled(&mut self, enabled: bool) {
        pac::ADC.cs().modify(|w| w.set_en(enabled));
    }

    fn apply_timing(&mut self, timing: SampleTiming) {
        // The sample window is fixed at 96 ADC cycles on this part; only
        // the conversion clock divisor is programmable.
        pac::ADC.div().write(|w| {
            w.set_int(timing.clock_divisor as u16);
            w.set_frac(0);
        });
    }

    fn set_sampling(&mut self, sampling: bool) {
        // Releasing the sample gate launches the one-shot; asserting it
        // has no register-level counterpart here.
        if !sampling {
            pac::ADC.cs().modify(|w| w.set_start_once(true));
        }
    }

    fn conversion_done(&self) -> bool {
        // READY deasserts for the duration of a conversion
        pac::ADC.cs().read().ready()
    }

    fn raw_result(&self) -> u16 {
        pac::ADC.result().read().result()
    }
}

/// The ADC input multiplexer
pub struct InputMux {
    _private: (),
}

impl InputMux {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for InputMux {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelMux for InputMux {
    fn channel_count(&self) -> u8 {
        ANALOG_CHANNELS
    }

    fn select(&mut self, channel: u8) {
        pac::ADC.cs().modify(|w| {
            // The temperature sense element only powers up while selected
            w.set_ts_en(channel == TEMP_CHANNEL);
            w.set_ainsel(channel);
        });
    }
}
