//! SAR conversion state machine
//!
//! Drives a successive-approximation converter through a manual protocol:
//! select the channel, hold the sample gate for the acquisition window,
//! release it to start the conversion, poll for completion, read the buffer.
//! The blocking and non-blocking entry points share one internal phase
//! machine so a second conversion can never be started over an in-flight
//! one.

use metron_hal::{ChannelMux, ConverterControl, SampleTiming};

/// Sample resolution in bits
pub const RESOLUTION_BITS: u8 = 12;

/// Largest sample value at [`RESOLUTION_BITS`]
pub const MAX_SAMPLE: u16 = (1 << RESOLUTION_BITS) - 1;

/// Spin iterations per acquisition tap
///
/// The acquisition hold is an uncalibrated busy-wait scaled by the
/// configured tap count, not a wall-clock delay.
const ACQUISITION_SPINS_PER_TAP: u32 = 16;

/// Default completion-poll budget for the blocking read
///
/// A conversion finishes in a few converter clock periods; a flag that has
/// not asserted after this many polls is stuck hardware, not latency.
const DEFAULT_POLL_BUDGET: u32 = 100_000;

/// Conversion phases
///
/// Internal to the driver; the public API exposes them only through the
/// errors and the completion poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Converter core unpowered; `init` has not run
    Off,
    /// Powered and quiescent, ready to sample
    Idle,
    /// Sample gate asserted, acquisition window open
    Sampling,
    /// Gate released, conversion in flight
    Converting,
}

/// Errors from conversion operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionError {
    /// Requested channel is outside the mux range
    InvalidChannel {
        /// The channel that was requested
        channel: u8,
        /// Number of channels the mux routes
        limit: u8,
    },
    /// A conversion is already in flight on this converter
    Busy,
    /// The converter has not been powered up via `init`
    PoweredDown,
    /// The completion flag never asserted within the poll budget
    ///
    /// The in-flight conversion is abandoned; the converter returns to idle
    /// so the caller can retry.
    Timeout,
}

/// Driver for one SAR converter block
///
/// Owns the control and mux capabilities exclusively; nothing else in the
/// firmware touches the converter registers. One conversion at a time: the
/// driver is not meant to be shared between execution contexts.
pub struct AnalogConverter<C, M> {
    control: C,
    mux: M,
    phase: Phase,
    timing: SampleTiming,
    last_sample: u16,
    poll_budget: Option<u32>,
}

impl<C: ConverterControl, M: ChannelMux> AnalogConverter<C, M> {
    /// Create the driver with default timing, powered down
    pub fn new(control: C, mux: M) -> Self {
        Self {
            control,
            mux,
            phase: Phase::Off,
            timing: SampleTiming::default(),
            last_sample: 0,
            poll_budget: Some(DEFAULT_POLL_BUDGET),
        }
    }

    /// Builder: override the acquisition/divisor timing
    ///
    /// Takes effect at the next [`init`](Self::init).
    pub fn with_timing(mut self, timing: SampleTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Builder: override the blocking read's completion-poll budget
    ///
    /// `None` polls forever, matching the original hardware contract.
    pub fn with_poll_budget(mut self, budget: Option<u32>) -> Self {
        self.poll_budget = budget;
        self
    }

    /// Configure and power up the converter
    ///
    /// Disables the core while programming timing, selects channel 0,
    /// discards any stale buffered result, then enables the core.
    pub fn init(&mut self) {
        self.control.set_enabled(false);
        self.control.apply_timing(self.timing);
        self.mux.select(0);
        // Drain whatever an earlier conversion left in the buffer
        let _ = self.control.raw_result();
        self.control.set_enabled(true);
        self.phase = Phase::Idle;
    }

    /// Start a conversion on `channel` without waiting for it
    ///
    /// Selects the channel, holds the sample gate for the acquisition
    /// window, then releases it and returns with the conversion in flight.
    /// Completion is observed via [`is_conversion_done`](Self::is_conversion_done)
    /// and consumed via [`result`](Self::result).
    pub fn start_single(&mut self, channel: u8) -> Result<(), ConversionError> {
        let limit = self.mux.channel_count();
        if channel >= limit {
            return Err(ConversionError::InvalidChannel { channel, limit });
        }
        match self.phase {
            Phase::Off => return Err(ConversionError::PoweredDown),
            Phase::Sampling | Phase::Converting => return Err(ConversionError::Busy),
            Phase::Idle => {}
        }

        self.mux.select(channel);

        self.phase = Phase::Sampling;
        self.control.set_sampling(true);
        self.hold_acquisition();
        self.control.set_sampling(false);
        self.phase = Phase::Converting;

        Ok(())
    }

    /// Poll the completion flag
    ///
    /// Absent hardware conservatively reports done, so pollers never hang.
    pub fn is_conversion_done(&self) -> bool {
        self.control.conversion_done()
    }

    /// Read the result buffer, masked to [`RESOLUTION_BITS`]
    ///
    /// Consumes the in-flight conversion, returning the driver to idle.
    /// Calling before [`is_conversion_done`](Self::is_conversion_done)
    /// reports true yields stale or partial data; the blocking read handles
    /// the ordering for you.
    pub fn result(&mut self) -> u16 {
        let sample = self.control.raw_result() & MAX_SAMPLE;
        self.last_sample = sample;
        if matches!(self.phase, Phase::Sampling | Phase::Converting) {
            self.phase = Phase::Idle;
        }
        sample
    }

    /// Convert `channel` and wait for the sample
    ///
    /// The primary caller-facing entry point: start, poll to completion
    /// within the poll budget, read. Fully serializes one conversion per
    /// call.
    pub fn read_single_blocking(&mut self, channel: u8) -> Result<u16, ConversionError> {
        self.start_single(channel)?;

        let mut budget = self.poll_budget;
        while !self.is_conversion_done() {
            if let Some(polls) = budget.as_mut() {
                if *polls == 0 {
                    // Abandon the conversion so a retry starts clean
                    self.phase = Phase::Idle;
                    return Err(ConversionError::Timeout);
                }
                *polls -= 1;
            }
            core::hint::spin_loop();
        }

        Ok(self.result())
    }

    /// The most recent masked sample
    pub fn last_result(&self) -> u16 {
        self.last_sample
    }

    /// Whether the converter block exists on this target
    pub fn hardware_present(&self) -> bool {
        self.control.present()
    }

    /// The timing the converter was (or will be) initialized with
    pub fn timing(&self) -> SampleTiming {
        self.timing
    }

    fn hold_acquisition(&self) {
        let spins = u32::from(self.timing.acquisition_taps) * ACQUISITION_SPINS_PER_TAP;
        for _ in 0..spins {
            core::hint::spin_loop();
        }
    }
}
