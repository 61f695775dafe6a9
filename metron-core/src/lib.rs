//! Board-agnostic core logic for the Metron acquisition firmware
//!
//! This crate contains all logic that does not depend on specific
//! hardware implementations:
//!
//! - Clock profile derivation from the oscillator selection
//! - System lifecycle state machine (init/ready/sleep/error)
//! - SAR conversion state machine (blocking and non-blocking protocols)
//! - Board configuration types
//! - Configuration report rendering

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod clock;
pub mod config;
pub mod converter;
pub mod report;
pub mod system;
