//! PWM output abstraction

/// Index-addressed PWM output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmChannel(pub u8);

impl PwmChannel {
    /// Channel index
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// 8-bit duty-cycle outputs with a carrier fixed at initialisation
pub trait PwmOutput {
    /// Set the duty on `channel`; 0 is off, 255 is fully on
    fn set_duty(&mut self, channel: PwmChannel, duty: u8);

    /// Force every output low
    fn disable_all(&mut self);
}

impl<T: PwmOutput + ?Sized> PwmOutput for &mut T {
    fn set_duty(&mut self, channel: PwmChannel, duty: u8) {
        (**self).set_duty(channel, duty)
    }

    fn disable_all(&mut self) {
        (**self).disable_all()
    }
}
