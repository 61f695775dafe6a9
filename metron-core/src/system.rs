//! System lifecycle state machine
//!
//! One `System` value owns the authoritative [`SystemState`] for the whole
//! firmware. Peripheral drivers never reach into it; they are gated by the
//! initialization ordering the application follows (initialize the system,
//! then the converter, then sample).

use metron_hal::{InterruptMask, PortControl, PortId, WakeSource};

use crate::clock::{ClockProfile, ConfigWarning};
use crate::config::BoardConfig;

/// Coarse power/readiness states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemState {
    /// Power-on value; also the result of deinitialization
    Init,
    /// Ports wired, interrupts live, peripherals may run
    Ready,
    /// Reserved for long-running peripheral work
    Busy,
    /// Fault latched; cleared by re-initializing
    Error,
    /// Blocked in the sleep loop awaiting a wake event
    Sleep,
}

impl SystemState {
    /// Check if this is the fault state
    pub fn is_error(&self) -> bool {
        matches!(self, SystemState::Error)
    }

    /// Check if peripherals may run
    pub fn is_operational(&self) -> bool {
        matches!(self, SystemState::Ready)
    }
}

/// Errors from the sleep loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepError {
    /// The poll budget ran out before a wake event arrived
    ///
    /// The state is left in [`SystemState::Sleep`]; the caller decides
    /// whether to retry, force a [`System::wakeup`], or latch a fault.
    Timeout,
}

/// The system lifecycle
///
/// Sequences initialization, sleep/wake, and reset over the injected
/// interrupt gate and port wiring. The clock profile is derived once at
/// construction from the board's oscillator selection.
pub struct System<I, P> {
    state: SystemState,
    config: BoardConfig,
    clock: ClockProfile,
    clock_warning: Option<ConfigWarning>,
    irq: I,
    ports: P,
    sleep_poll_budget: Option<u32>,
}

impl<I: InterruptMask, P: PortControl> System<I, P> {
    /// Create the lifecycle in the `Init` state
    pub fn new(irq: I, ports: P, config: BoardConfig) -> Self {
        let (clock, clock_warning) = ClockProfile::derive(config.oscillator);
        Self {
            state: SystemState::Init,
            config,
            clock,
            clock_warning,
            irq,
            ports,
            sleep_poll_budget: None,
        }
    }

    /// Bound the sleep loop to `polls` wake-source polls
    ///
    /// Without a budget the loop matches the hardware contract and waits
    /// forever for its wake interrupt.
    pub fn with_sleep_poll_budget(mut self, polls: u32) -> Self {
        self.sleep_poll_budget = Some(polls);
        self
    }

    /// Bring the system to `Ready`
    ///
    /// Port wiring happens inside an interrupt-disabled critical section so
    /// a handler can never observe a half-configured port. Idempotent:
    /// calling twice re-applies the wiring and ends in `Ready` both times.
    pub fn initialize(&mut self) {
        self.irq.disable();

        for port in PortId::ALL {
            if self.config.ports.is_enabled(port) {
                self.ports.open_as_outputs(port);
            } else {
                self.ports.park(port);
            }
        }

        self.state = SystemState::Ready;

        self.irq.enable();
    }

    /// Park every port and return to `Init`
    ///
    /// Callable from any state.
    pub fn deinitialize(&mut self) {
        for port in PortId::ALL {
            self.ports.park(port);
        }
        self.state = SystemState::Init;
    }

    /// Enter `Sleep` and block until a wake event arrives
    ///
    /// This is a tight poll of the wake source, not a hardware low-power
    /// mode; the wake source is typically a [`metron_hal::WakeFlag`] an
    /// interrupt handler signals. With a poll budget installed, exhaustion
    /// returns [`SleepError::Timeout`] with the state still `Sleep`.
    pub fn enter_sleep<W: WakeSource>(&mut self, wake: &mut W) -> Result<(), SleepError> {
        self.state = SystemState::Sleep;

        let mut budget = self.sleep_poll_budget;
        loop {
            if wake.poll() {
                self.wakeup();
            }
            if self.state != SystemState::Sleep {
                return Ok(());
            }
            if let Some(polls) = budget.as_mut() {
                if *polls == 0 {
                    return Err(SleepError::Timeout);
                }
                *polls -= 1;
            }
            core::hint::spin_loop();
        }
    }

    /// Leave `Sleep` for `Ready`; no-op in any other state
    pub fn wakeup(&mut self) {
        if self.state == SystemState::Sleep {
            self.state = SystemState::Ready;
        }
    }

    /// Latch the fault state
    ///
    /// The recovery path is [`System::initialize`].
    pub fn fault(&mut self) {
        self.state = SystemState::Error;
    }

    /// Return to `Init` and hold for the physical reset
    ///
    /// Stand-in for a hardware reset sequence: the quiescent loop never
    /// returns, leaving the watchdog or the reset line to act.
    pub fn reset(&mut self) -> ! {
        self.state = SystemState::Init;
        loop {
            core::hint::spin_loop();
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SystemState {
        self.state
    }

    /// Derived clock profile
    pub fn clock(&self) -> &ClockProfile {
        &self.clock
    }

    /// Instruction-cycle frequency in Hz
    pub fn clock_frequency(&self) -> u32 {
        self.clock.instruction_hz()
    }

    /// Warning raised during clock derivation, if any
    pub fn clock_warning(&self) -> Option<ConfigWarning> {
        self.clock_warning
    }

    /// The board configuration this lifecycle was built with
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortMap;
    use core::cell::Cell;

    /// Interrupt gate mock sharing its enabled flag with the port mock, so
    /// tests can catch port wiring outside the critical section.
    struct BenchIrq<'a> {
        enabled: &'a Cell<bool>,
    }

    impl InterruptMask for BenchIrq<'_> {
        fn enable(&mut self) {
            self.enabled.set(true);
        }

        fn disable(&mut self) {
            self.enabled.set(false);
        }
    }

    struct BenchPorts<'a> {
        irq_enabled: &'a Cell<bool>,
        wired_while_unmasked: &'a Cell<bool>,
        opened: [u8; 7],
        parked: [u8; 7],
    }

    impl<'a> BenchPorts<'a> {
        fn new(irq_enabled: &'a Cell<bool>, wired_while_unmasked: &'a Cell<bool>) -> Self {
            Self {
                irq_enabled,
                wired_while_unmasked,
                opened: [0; 7],
                parked: [0; 7],
            }
        }

        fn record(&self) {
            if self.irq_enabled.get() {
                self.wired_while_unmasked.set(true);
            }
        }
    }

    impl PortControl for BenchPorts<'_> {
        fn open_as_outputs(&mut self, port: PortId) {
            self.record();
            self.opened[port.index()] += 1;
        }

        fn park(&mut self, port: PortId) {
            self.record();
            self.parked[port.index()] += 1;
        }
    }

    /// Wake source that stays quiet for a fixed number of polls
    struct CountdownWake(u32);

    impl WakeSource for CountdownWake {
        fn poll(&mut self) -> bool {
            if self.0 == 0 {
                true
            } else {
                self.0 -= 1;
                false
            }
        }
    }

    struct NeverWake;

    impl WakeSource for NeverWake {
        fn poll(&mut self) -> bool {
            false
        }
    }

    fn bench_system<'a>(
        irq_enabled: &'a Cell<bool>,
        violation: &'a Cell<bool>,
        config: BoardConfig,
    ) -> System<BenchIrq<'a>, BenchPorts<'a>> {
        irq_enabled.set(true);
        System::new(
            BenchIrq {
                enabled: irq_enabled,
            },
            BenchPorts::new(irq_enabled, violation),
            config,
        )
    }

    #[test]
    fn test_initialize_reaches_ready() {
        let irq_enabled = Cell::new(false);
        let violation = Cell::new(false);
        let mut system = bench_system(&irq_enabled, &violation, BoardConfig::default());

        assert_eq!(system.state(), SystemState::Init);
        system.initialize();
        assert_eq!(system.state(), SystemState::Ready);
        // Interrupts restored after the critical section
        assert!(irq_enabled.get());
    }

    #[test]
    fn test_port_wiring_stays_inside_critical_section() {
        let irq_enabled = Cell::new(false);
        let violation = Cell::new(false);
        let mut system = bench_system(&irq_enabled, &violation, BoardConfig::default());

        system.initialize();
        assert!(!violation.get());
    }

    #[test]
    fn test_initialize_wires_enabled_ports_only() {
        let irq_enabled = Cell::new(false);
        let violation = Cell::new(false);
        let config = BoardConfig {
            ports: PortMap::none().with(PortId::B).with(PortId::D),
            ..BoardConfig::default()
        };
        let mut system = bench_system(&irq_enabled, &violation, config);

        system.initialize();
        assert_eq!(system.ports.opened[PortId::B.index()], 1);
        assert_eq!(system.ports.opened[PortId::D.index()], 1);
        assert_eq!(system.ports.opened[PortId::A.index()], 0);
        // Disabled ports are parked for power savings
        assert_eq!(system.ports.parked[PortId::A.index()], 1);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let irq_enabled = Cell::new(false);
        let violation = Cell::new(false);
        let mut system = bench_system(&irq_enabled, &violation, BoardConfig::default());

        system.initialize();
        assert_eq!(system.state(), SystemState::Ready);
        system.initialize();
        assert_eq!(system.state(), SystemState::Ready);
        // Wiring re-applied on the second pass
        assert_eq!(system.ports.opened[PortId::B.index()], 2);
    }

    #[test]
    fn test_deinitialize_parks_everything() {
        let irq_enabled = Cell::new(false);
        let violation = Cell::new(false);
        let mut system = bench_system(&irq_enabled, &violation, BoardConfig::default());

        system.initialize();
        system.deinitialize();
        assert_eq!(system.state(), SystemState::Init);
        for port in PortId::ALL {
            assert!(system.ports.parked[port.index()] >= 1);
        }
    }

    #[test]
    fn test_sleep_until_woken() {
        let irq_enabled = Cell::new(false);
        let violation = Cell::new(false);
        let mut system = bench_system(&irq_enabled, &violation, BoardConfig::default());

        system.initialize();
        let mut wake = CountdownWake(25);
        assert_eq!(system.enter_sleep(&mut wake), Ok(()));
        assert_eq!(system.state(), SystemState::Ready);
    }

    #[test]
    fn test_sleep_timeout_leaves_sleep_state() {
        let irq_enabled = Cell::new(false);
        let violation = Cell::new(false);
        let mut system = bench_system(&irq_enabled, &violation, BoardConfig::default())
            .with_sleep_poll_budget(50);

        system.initialize();
        assert_eq!(system.enter_sleep(&mut NeverWake), Err(SleepError::Timeout));
        // Still asleep; the caller resolves it
        assert_eq!(system.state(), SystemState::Sleep);
        system.wakeup();
        assert_eq!(system.state(), SystemState::Ready);
    }

    #[test]
    fn test_wakeup_is_noop_outside_sleep() {
        let irq_enabled = Cell::new(false);
        let violation = Cell::new(false);
        let mut system = bench_system(&irq_enabled, &violation, BoardConfig::default());

        system.wakeup();
        assert_eq!(system.state(), SystemState::Init);

        system.initialize();
        system.wakeup();
        assert_eq!(system.state(), SystemState::Ready);

        system.fault();
        system.wakeup();
        assert_eq!(system.state(), SystemState::Error);
    }

    #[test]
    fn test_fault_recovers_through_initialize() {
        let irq_enabled = Cell::new(false);
        let violation = Cell::new(false);
        let mut system = bench_system(&irq_enabled, &violation, BoardConfig::default());

        system.initialize();
        system.fault();
        assert!(system.state().is_error());
        system.initialize();
        assert_eq!(system.state(), SystemState::Ready);
    }

    #[test]
    fn test_clock_frequency_for_default_board() {
        let irq_enabled = Cell::new(false);
        let violation = Cell::new(false);
        let system = bench_system(&irq_enabled, &violation, BoardConfig::default());

        assert_eq!(system.clock_frequency(), 40_000_000);
        assert!(system.clock_warning().is_none());
    }

    #[test]
    fn test_missing_oscillator_warns_and_defaults() {
        let irq_enabled = Cell::new(false);
        let violation = Cell::new(false);
        let config = BoardConfig {
            oscillator: None,
            ..BoardConfig::default()
        };
        let system = bench_system(&irq_enabled, &violation, config);

        assert_eq!(
            system.clock_warning(),
            Some(ConfigWarning::NoOscillatorSelected)
        );
        assert_eq!(system.clock_frequency(), 3_685_000);
    }

    /// The gate is a flat toggle: two disables are undone by one enable.
    #[test]
    fn test_interrupt_mask_does_not_nest() {
        let enabled = Cell::new(true);
        let mut irq = BenchIrq { enabled: &enabled };

        irq.disable();
        irq.disable();
        irq.enable();
        assert!(enabled.get());
    }
}
