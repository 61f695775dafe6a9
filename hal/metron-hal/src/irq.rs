//! Global maskable-interrupt gate
//!
//! A single process-wide on/off switch for interrupt delivery. The gate is a
//! flat toggle, not a nesting counter: `disable(); disable(); enable();`
//! leaves interrupts enabled. Callers that need nesting must track depth
//! themselves.

/// Process-wide interrupt enable/disable
pub trait InterruptMask {
    /// Resume global interrupt delivery
    fn enable(&mut self);

    /// Suspend global interrupt delivery
    ///
    /// Not re-entrant: a single `enable` undoes any number of `disable`s.
    fn disable(&mut self);
}

/// Interrupt-gate stand-in for targets without a global mask
#[derive(Debug, Default, Clone, Copy)]
pub struct AbsentInterruptMask;

impl InterruptMask for AbsentInterruptMask {
    fn enable(&mut self) {}

    fn disable(&mut self) {}
}
