//! Port direction wiring
//!
//! The RP2040 exposes one 30-pin GPIO bank rather than lettered ports;
//! the lettered ports map onto 8-pin windows of the bank:
//!
//! - Port A: GPIO0-7
//! - Port B: GPIO8-15 (board LEDs)
//! - Port C: GPIO16-23
//! - Port D: GPIO24-29 (partial window; the bank ends at GPIO29)
//! - Ports E-G: not routed on this package; wiring them is a no-op

use embassy_rp::pac;
use metron_hal::{PortControl, PortId};

/// SIO function number in the pin mux
const FUNCSEL_SIO: u8 = 5;

/// Null function: pad disconnected from every peripheral
const FUNCSEL_NULL: u8 = 0x1f;

fn window_mask(port: PortId) -> u32 {
    match port {
        PortId::A => 0x0000_00FF,
        PortId::B => 0x0000_FF00,
        PortId::C => 0x00FF_0000,
        PortId::D => 0x3F00_0000,
        PortId::E | PortId::F | PortId::G => 0,
    }
}

/// Port direction control over the GPIO bank
pub struct PortWindows {
    _private: (),
}

impl PortWindows {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for PortWindows {
    fn default() -> Self {
        Self::new()
    }
}

impl PortControl for PortWindows {
    fn open_as_outputs(&mut self, port: PortId) {
        let mask = window_mask(port);
        if mask == 0 {
            return;
        }

        // Latch low before flipping direction so pins never glitch high
        pac::SIO.gpio_out_clr().write_value(mask);

        for pin in 0..30 {
            if mask & (1 << pin) != 0 {
                pac::IO_BANK0
                    .gpio(pin)
                    .ctrl()
                    .write(|w| w.set_funcsel(FUNCSEL_SIO));
            }
        }

        pac::SIO.gpio_oe_set().write_value(mask);
    }

    fn park(&mut self, port: PortId) {
        let mask = window_mask(port);
        if mask == 0 {
            return;
        }

        pac::SIO.gpio_oe_clr().write_value(mask);

        for pin in 0..30 {
            if mask & (1 << pin) != 0 {
                pac::IO_BANK0
                    .gpio(pin)
                    .ctrl()
                    .write(|w| w.set_funcsel(FUNCSEL_NULL));
            }
        }
    }
}
