//! Metron Hardware Capability Layer
//!
//! This crate defines one trait per hardware capability the core logic
//! depends on. Chip-specific crates (RP2040, etc.) implement the traits;
//! targets that lack a capability use the `Absent*` implementation, which
//! degrades every operation to a documented no-op instead of undefined
//! register access.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (metron-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  metron-core (lifecycle + converter)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  metron-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  metron-hal-  │       │   Absent*     │
//! │    rp2040     │       │  (no-ops)     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`converter::ConverterControl`], [`converter::ChannelMux`] - SAR converter block
//! - [`port::PortControl`] - I/O port direction wiring
//! - [`irq::InterruptMask`] - global maskable-interrupt gate
//! - [`wake::WakeSource`] - wake events for the sleep loop

#![no_std]
#![deny(unsafe_code)]

pub mod converter;
pub mod irq;
pub mod port;
pub mod wake;

// Re-export key traits at crate root for convenience
pub use converter::{AbsentConverter, AbsentMux, ChannelMux, ConverterControl, SampleTiming};
pub use irq::{AbsentInterruptMask, InterruptMask};
pub use port::{AbsentPorts, PortControl, PortId};
pub use wake::{AbsentWake, WakeFlag, WakeSource};
