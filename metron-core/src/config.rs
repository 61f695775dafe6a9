//! Board configuration surface
//!
//! Compile-time selections for one board build: oscillator mode, supervisory
//! features, and which I/O ports the lifecycle wires up. These are plain data
//! the application constructs once and hands to the lifecycle; they are not
//! read back from hardware.

use metron_hal::PortId;

use crate::clock::OscillatorMode;

/// Watchdog timer arming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WatchdogMode {
    /// Watchdog disabled
    #[default]
    Off,
    /// Watchdog armed with the standard period
    Normal,
    /// Watchdog armed with the long window for slow duty cycles
    Long,
}

/// Brown-out detect threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrownOutLevel {
    /// Brown-out detect disabled
    #[default]
    Off,
    /// Reset below 2.0 V
    V20,
    /// Reset below 2.7 V
    V27,
    /// Reset below 4.2 V
    V42,
}

/// Per-port enable flags
///
/// An enabled port gets its low byte driven as outputs during
/// initialization; disabled ports are parked as inputs for power savings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortMap {
    enabled: [bool; 7],
}

impl PortMap {
    /// No ports enabled
    pub const fn none() -> Self {
        Self {
            enabled: [false; 7],
        }
    }

    /// Builder: enable `port`
    pub const fn with(mut self, port: PortId) -> Self {
        self.enabled[port.index()] = true;
        self
    }

    /// Enable `port`
    pub fn enable(&mut self, port: PortId) {
        self.enabled[port.index()] = true;
    }

    /// Disable `port`
    pub fn disable(&mut self, port: PortId) {
        self.enabled[port.index()] = false;
    }

    /// Whether `port` is enabled
    pub const fn is_enabled(&self, port: PortId) -> bool {
        self.enabled[port.index()]
    }

    /// Iterate over the enabled ports in letter order
    pub fn iter_enabled(&self) -> impl Iterator<Item = PortId> + '_ {
        PortId::ALL
            .into_iter()
            .filter(move |port| self.is_enabled(*port))
    }
}

impl Default for PortMap {
    fn default() -> Self {
        Self::none()
    }
}

/// One board build's configuration selections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardConfig {
    /// Oscillator selection; `None` falls back to the default clock profile
    /// with a diagnostic warning
    pub oscillator: Option<OscillatorMode>,
    /// Watchdog timer arming
    pub watchdog: WatchdogMode,
    /// Master-clear reset pin enabled
    pub master_clear: bool,
    /// Brown-out detect threshold
    pub brown_out: BrownOutLevel,
    /// Code read-protection
    pub code_protect: bool,
    /// Debug pin pair reserved for the debugger
    pub debug_pins: bool,
    /// Runtime clock switching permitted
    pub clock_switching: bool,
    /// Ports the lifecycle wires as outputs
    pub ports: PortMap,
}

impl Default for BoardConfig {
    /// The stock board build: internal oscillator with PLL, all supervisory
    /// features off, MCLR usable, LEDs on port B.
    fn default() -> Self {
        Self {
            oscillator: Some(OscillatorMode::InternalPll),
            watchdog: WatchdogMode::Off,
            master_clear: true,
            brown_out: BrownOutLevel::Off,
            code_protect: false,
            debug_pins: false,
            clock_switching: false,
            ports: PortMap::none().with(PortId::B),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selections() {
        let config = BoardConfig::default();
        assert_eq!(config.oscillator, Some(OscillatorMode::InternalPll));
        assert_eq!(config.watchdog, WatchdogMode::Off);
        assert!(config.master_clear);
        assert_eq!(config.brown_out, BrownOutLevel::Off);
        assert!(!config.code_protect);
        assert!(!config.debug_pins);
        assert!(!config.clock_switching);
        assert!(config.ports.is_enabled(PortId::B));
        assert!(!config.ports.is_enabled(PortId::A));
    }

    #[test]
    fn test_port_map_builder_and_iteration() {
        let map = PortMap::none().with(PortId::B).with(PortId::D);

        assert!(map.is_enabled(PortId::B));
        assert!(map.is_enabled(PortId::D));
        assert!(!map.is_enabled(PortId::C));

        let enabled: std::vec::Vec<PortId> = map.iter_enabled().collect();
        assert_eq!(enabled, [PortId::B, PortId::D]);
    }

    #[test]
    fn test_port_map_disable() {
        let mut map = PortMap::none().with(PortId::B);
        map.disable(PortId::B);
        assert!(!map.is_enabled(PortId::B));
        assert_eq!(map, PortMap::none());
    }
}
