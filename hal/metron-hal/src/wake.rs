//! Wake events for the sleep loop
//!
//! The lifecycle's sleep loop does not execute a low-power instruction; it
//! polls a [`WakeSource`] until some other execution context (typically an
//! interrupt handler) signals a wake event. Injecting the source keeps the
//! loop testable with a bounded or scripted wake instead of real interrupts.

use core::sync::atomic::{AtomicBool, Ordering};

/// A source of wake events
pub trait WakeSource {
    /// True when a wake event is pending; consumes the event
    fn poll(&mut self) -> bool;
}

/// Static-friendly wake flag an interrupt handler can signal
///
/// Uses only atomic load/store so it works on cores without compare-exchange
/// (thumbv6m). The one-producer/one-consumer pattern of an ISR signalling the
/// sleep loop needs nothing stronger.
#[derive(Debug, Default)]
pub struct WakeFlag {
    raised: AtomicBool,
}

impl WakeFlag {
    /// Create a flag with no pending wake
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Signal a wake event (callable from an interrupt handler)
    pub fn signal(&self) {
        self.raised.store(true, Ordering::Release);
    }

    fn take(&self) -> bool {
        if self.raised.load(Ordering::Acquire) {
            self.raised.store(false, Ordering::Release);
            true
        } else {
            false
        }
    }
}

impl WakeSource for WakeFlag {
    fn poll(&mut self) -> bool {
        self.take()
    }
}

// Sleep loops usually hold `&'static WakeFlag` so the ISR can reach the same
// flag; poll through the shared reference.
impl WakeSource for &WakeFlag {
    fn poll(&mut self) -> bool {
        self.take()
    }
}

/// Wake stand-in for targets without a wake interrupt
///
/// Reports an immediate wake rather than stranding the sleep loop forever.
#[derive(Debug, Default, Clone, Copy)]
pub struct AbsentWake;

impl WakeSource for AbsentWake {
    fn poll(&mut self) -> bool {
        true
    }
}
