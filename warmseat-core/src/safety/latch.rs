//! Shutdown latch
//!
//! Entry zeroes every heater output before anything else, then lights the
//! fault indicator. The latch does not loop: it hands back a [`Halt`]
//! token and the platform entry point idles forever, calling
//! [`ShutdownLatch::reassert`] on every wake in case the indicator bit
//! was disturbed.

use warmseat_hal::{OutputPin, PwmChannel, PwmOutput};

use crate::state::ShutdownReason;

/// Proof that outputs are off and the fault indicator is lit
#[must_use = "the caller must stop driving outputs and idle"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Halt {
    reason: ShutdownReason,
}

impl Halt {
    /// Why the latch engaged
    pub fn reason(&self) -> ShutdownReason {
        self.reason
    }
}

/// Terminal safe-state actions
pub struct ShutdownLatch;

impl ShutdownLatch {
    /// Zero and disable every output, then assert the fault indicator
    ///
    /// `outputs` lists the channels to zero explicitly; `disable_all`
    /// covers anything not listed.
    pub fn engage<P, F, I>(pwm: &mut P, fault: &mut F, outputs: I, reason: ShutdownReason) -> Halt
    where
        P: PwmOutput,
        F: OutputPin,
        I: IntoIterator<Item = PwmChannel>,
    {
        for channel in outputs {
            pwm.set_duty(channel, 0);
        }
        pwm.disable_all();
        fault.set_high();

        Halt { reason }
    }

    /// Re-drive the fault indicator
    pub fn reassert<F: OutputPin>(fault: &mut F) {
        fault.set_high();
    }
}
