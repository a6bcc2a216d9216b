//! Reset cause reporting

/// Why the chip last came out of reset
///
/// Reported once in the boot diagnostic so a brown-out loop or a
/// watchdog reset shows up on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetCause {
    /// Power-on, brown-out or external reset pin
    #[default]
    PowerOn,
    /// Watchdog timer expired
    Watchdog,
    /// Reset requested by software
    Software,
}
