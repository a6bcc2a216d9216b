//! Peripheral bundle
//!
//! The capabilities the control loop may use, passed in explicitly
//! rather than reached through globals.

use warmseat_hal::{AnalogInput, Console, OutputPin, PwmOutput};

/// Peripherals driven by the control loop
pub struct Board<A, P, C, F> {
    /// Knob, enable and battery sampling
    pub adc: A,
    /// Heater drive outputs
    pub pwm: P,
    /// Diagnostic text
    pub console: C,
    /// Fault indicator
    pub fault: F,
}

impl<A, P, C, F> Board<A, P, C, F>
where
    A: AnalogInput,
    P: PwmOutput,
    C: Console,
    F: OutputPin,
{
    /// Bundle peripherals
    pub fn new(adc: A, pwm: P, console: C, fault: F) -> Self {
        Self {
            adc,
            pwm,
            console,
            fault,
        }
    }
}
