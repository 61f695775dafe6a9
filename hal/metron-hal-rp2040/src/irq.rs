//! Global interrupt mask
//!
//! Maps the interrupt gate onto the Cortex-M PRIMASK bit. PRIMASK is a
//! single flag, which gives the flat non-nesting behavior the trait
//! documents for free.

use metron_hal::InterruptMask;

/// The Cortex-M global interrupt mask
pub struct Primask {
    _private: (),
}

impl Primask {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for Primask {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptMask for Primask {
    fn enable(&mut self) {
        // Callers hold this only around short wiring sections with no
        // nested masking, which is the soundness condition here.
        unsafe { cortex_m::interrupt::enable() };
    }

    fn disable(&mut self) {
        cortex_m::interrupt::disable();
    }
}
