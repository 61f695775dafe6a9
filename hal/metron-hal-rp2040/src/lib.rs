//! RP2040 implementations of the Metron hardware capabilities
//!
//! Maps the `metron-hal` capability traits onto the RP2040's register
//! blocks through `embassy_rp::pac`:
//!
//! - [`adc::ConverterBlock`] / [`adc::InputMux`] - the ADC block
//! - [`gpio::PortWindows`] - port direction wiring over the GPIO bank
//! - [`irq::Primask`] - the Cortex-M global interrupt mask
//!
//! All of these assume `embassy_rp::init` has run: it releases the
//! peripherals from reset and starts the ADC clock.

#![no_std]

pub mod adc;
pub mod gpio;
pub mod irq;

pub use adc::{ConverterBlock, InputMux};
pub use gpio::PortWindows;
pub use irq::Primask;
