//! Configuration report rendering
//!
//! Human-readable dump of the active board configuration and the derived
//! instruction frequency. The renderer writes into any [`core::fmt::Write`]
//! sink; the platform decides what that sink is (UART, RTT, a bounded
//! string). A platform with no text sink simply never calls this.

use core::fmt::{self, Write};

use crate::clock::{ClockProfile, OscillatorMode};
use crate::config::{BoardConfig, BrownOutLevel, WatchdogMode};

/// Render the configuration report into `sink`
pub fn write_report<W: Write>(
    sink: &mut W,
    config: &BoardConfig,
    clock: &ClockProfile,
) -> fmt::Result {
    writeln!(sink, "System configuration:")?;

    let oscillator = match config.oscillator {
        Some(OscillatorMode::InternalPll) => "INTERNAL + PLL",
        Some(OscillatorMode::Internal) => "INTERNAL (no PLL)",
        Some(OscillatorMode::ExternalPll) => "EXTERNAL + PLL",
        Some(OscillatorMode::External) => "EXTERNAL (no PLL)",
        None => "DEFAULT",
    };
    writeln!(sink, "  Oscillator: {}", oscillator)?;

    let watchdog = match config.watchdog {
        WatchdogMode::Off => "OFF",
        WatchdogMode::Normal => "ON",
        WatchdogMode::Long => "ON (long window)",
    };
    writeln!(sink, "  WDT: {}", watchdog)?;

    writeln!(
        sink,
        "  MCLR: {}",
        if config.master_clear {
            "ENABLED"
        } else {
            "DISABLED"
        }
    )?;

    let brown_out = match config.brown_out {
        BrownOutLevel::Off => "OFF",
        BrownOutLevel::V20 => "2.0V",
        BrownOutLevel::V27 => "2.7V",
        BrownOutLevel::V42 => "4.2V",
    };
    writeln!(sink, "  BOR: {}", brown_out)?;

    writeln!(
        sink,
        "  Code Protect: {}",
        if config.code_protect { "ON" } else { "OFF" }
    )?;

    writeln!(sink, "  FCY: {} Hz", clock.instruction_hz())?;

    Ok(())
}
