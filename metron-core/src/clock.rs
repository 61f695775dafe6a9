//! Clock profile derivation
//!
//! The oscillator mode is a compile-time board decision; turning it into an
//! instruction frequency is pure arithmetic. The processor executes one
//! instruction per two system clock periods, so the instruction frequency is
//! always half the system frequency.

/// Internal fast RC oscillator frequency
pub const INTERNAL_FRC_HZ: u32 = 7_370_000;

/// Board crystal frequency for the unmultiplied external mode
///
/// Same nominal rate as the FRC on this board design.
pub const CRYSTAL_HZ: u32 = 7_370_000;

/// Primary source frequency feeding the PLL
pub const PLL_PRIMARY_HZ: u32 = 8_000_000;

/// System frequency at the PLL output
pub const PLL_SYSTEM_HZ: u32 = 80_000_000;

/// Clock source and multiplication strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OscillatorMode {
    /// Internal FRC through the PLL (8 MHz -> 80 MHz system)
    InternalPll,
    /// Internal FRC, unmultiplied (7.37 MHz)
    Internal,
    /// External crystal through the PLL (8 MHz -> 80 MHz system)
    ExternalPll,
    /// External crystal, unmultiplied
    External,
}

/// Non-fatal configuration findings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigWarning {
    /// No oscillator mode was selected; the default profile was substituted
    NoOscillatorSelected,
}

/// Derived clock frequencies
///
/// Immutable once derived; the lifecycle computes it exactly once at
/// construction from the board's oscillator selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockProfile {
    /// Primary source frequency (before the PLL, if any)
    pub primary_hz: u32,
    /// System frequency (after the PLL, if any)
    pub system_hz: u32,
}

impl ClockProfile {
    /// Instruction-cycle frequency: system frequency / 2
    pub const fn instruction_hz(&self) -> u32 {
        self.system_hz / 2
    }

    /// Derive the profile for an oscillator selection
    ///
    /// A missing selection substitutes the safe default (unmultiplied FRC)
    /// and reports [`ConfigWarning::NoOscillatorSelected`] alongside it.
    pub fn derive(mode: Option<OscillatorMode>) -> (Self, Option<ConfigWarning>) {
        match mode {
            Some(OscillatorMode::InternalPll) | Some(OscillatorMode::ExternalPll) => (
                Self {
                    primary_hz: PLL_PRIMARY_HZ,
                    system_hz: PLL_SYSTEM_HZ,
                },
                None,
            ),
            Some(OscillatorMode::Internal) => (
                Self {
                    primary_hz: INTERNAL_FRC_HZ,
                    system_hz: INTERNAL_FRC_HZ,
                },
                None,
            ),
            Some(OscillatorMode::External) => (
                Self {
                    primary_hz: CRYSTAL_HZ,
                    system_hz: CRYSTAL_HZ,
                },
                None,
            ),
            None => (
                Self {
                    primary_hz: INTERNAL_FRC_HZ,
                    system_hz: INTERNAL_FRC_HZ,
                },
                Some(ConfigWarning::NoOscillatorSelected),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_pll_instruction_frequency() {
        let (profile, warning) = ClockProfile::derive(Some(OscillatorMode::InternalPll));
        assert_eq!(profile.primary_hz, 8_000_000);
        assert_eq!(profile.system_hz, 80_000_000);
        assert_eq!(profile.instruction_hz(), 40_000_000);
        assert!(warning.is_none());
    }

    #[test]
    fn test_external_pll_matches_internal_pll() {
        let (internal, _) = ClockProfile::derive(Some(OscillatorMode::InternalPll));
        let (external, _) = ClockProfile::derive(Some(OscillatorMode::ExternalPll));
        assert_eq!(internal, external);
    }

    #[test]
    fn test_unmultiplied_modes() {
        for mode in [OscillatorMode::Internal, OscillatorMode::External] {
            let (profile, warning) = ClockProfile::derive(Some(mode));
            assert_eq!(profile.primary_hz, profile.system_hz);
            assert_eq!(profile.instruction_hz(), 7_370_000 / 2);
            assert!(warning.is_none());
        }
    }

    #[test]
    fn test_missing_selection_defaults_with_warning() {
        let (profile, warning) = ClockProfile::derive(None);
        assert_eq!(warning, Some(ConfigWarning::NoOscillatorSelected));
        assert_eq!(profile.system_hz, INTERNAL_FRC_HZ);
        assert_eq!(profile.instruction_hz(), 3_685_000);
    }
}
