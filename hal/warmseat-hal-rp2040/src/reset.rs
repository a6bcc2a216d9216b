//! Reset cause from the watchdog block
//!
//! The RP2040 watchdog records only its own resets: a timer expiry or a
//! forced trigger. Anything else (power-on, brown-out, RUN pin) leaves
//! the reason register clear.

use embassy_rp::watchdog::{ResetReason, Watchdog};
use warmseat_hal::ResetCause;

/// Map the watchdog's reason register to a [`ResetCause`]
pub fn from_reason(reason: Option<ResetReason>) -> ResetCause {
    match reason {
        Some(ResetReason::TimedOut) => ResetCause::Watchdog,
        Some(_) => ResetCause::Software,
        None => ResetCause::PowerOn,
    }
}

/// Read the last reset cause
pub fn reset_cause(watchdog: &Watchdog) -> ResetCause {
    from_reason(watchdog.reset_reason())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_mapping() {
        assert_eq!(from_reason(None), ResetCause::PowerOn);
        assert_eq!(from_reason(Some(ResetReason::TimedOut)), ResetCause::Watchdog);
        assert_eq!(from_reason(Some(ResetReason::Forced)), ResetCause::Software);
    }
}
