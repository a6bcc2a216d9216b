//! ADC channel bank
//!
//! RP2040 has a single ADC with 5 channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//! - ADC4: Internal temperature sensor
//!
//! The converter is 12-bit and always referenced to ADC_VREF. Readings are
//! shifted down to the 10-bit sample domain, and both [`Reference`]
//! selections read the same converter: absolute calibration is carried by
//! each input's scale instead.

use embassy_rp::adc::{Adc, Blocking, Channel};
use warmseat_hal::{AnalogChannel, AnalogInput, RawSample, Reference, SAMPLE_MAX};

/// Number of ADC inputs, including the temperature sensor
pub const ADC_CHANNELS: usize = 5;

/// Native converter resolution
const ADC_BITS: u32 = 12;

/// ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
    /// Internal temperature sensor
    Temperature,
}

impl AdcChannel {
    /// Get the GPIO pin for this ADC channel
    pub fn gpio(&self) -> Option<u8> {
        match self {
            AdcChannel::Adc0 => Some(26),
            AdcChannel::Adc1 => Some(27),
            AdcChannel::Adc2 => Some(28),
            AdcChannel::Adc3 => Some(29),
            AdcChannel::Temperature => None,
        }
    }

    /// Get ADC channel from GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcChannel::Adc0),
            27 => Some(AdcChannel::Adc1),
            28 => Some(AdcChannel::Adc2),
            29 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }

    /// Logical channel used by the control loop
    pub const fn logical(self) -> AnalogChannel {
        AnalogChannel(self as u8)
    }
}

/// Reduce a 12-bit reading to the 10-bit sample domain
pub fn to_sample(raw: u16) -> RawSample {
    (raw >> (ADC_BITS - 10)).min(SAMPLE_MAX)
}

/// Blocking ADC with a set of bound input channels
pub struct AdcBank<'d> {
    adc: Adc<'d, Blocking>,
    channels: [Option<Channel<'d>>; ADC_CHANNELS],
}

impl<'d> AdcBank<'d> {
    /// Create an empty bank
    pub fn new(adc: Adc<'d, Blocking>) -> Self {
        Self {
            adc,
            channels: [None, None, None, None, None],
        }
    }

    /// Bind an input to its ADC slot
    pub fn with_channel(mut self, id: AdcChannel, channel: Channel<'d>) -> Self {
        self.channels[id as usize] = Some(channel);
        self
    }
}

impl AnalogInput for AdcBank<'_> {
    /// Unbound channels and conversion errors read as 0
    fn read(&mut self, channel: AnalogChannel, _reference: Reference) -> RawSample {
        let Some(Some(input)) = self.channels.get_mut(channel.index()) else {
            return 0;
        };
        self.adc.blocking_read(input).map(to_sample).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_mapping() {
        for id in [
            AdcChannel::Adc0,
            AdcChannel::Adc1,
            AdcChannel::Adc2,
            AdcChannel::Adc3,
        ] {
            let gpio = id.gpio().unwrap();
            assert_eq!(AdcChannel::from_gpio(gpio), Some(id));
        }
        assert_eq!(AdcChannel::Temperature.gpio(), None);
        assert_eq!(AdcChannel::from_gpio(25), None);
    }

    #[test]
    fn test_logical_index() {
        assert_eq!(AdcChannel::Adc0.logical(), AnalogChannel(0));
        assert_eq!(AdcChannel::Adc3.logical(), AnalogChannel(3));
    }

    #[test]
    fn test_sample_reduction() {
        assert_eq!(to_sample(0), 0);
        assert_eq!(to_sample(3), 0);
        assert_eq!(to_sample(4), 1);
        assert_eq!(to_sample(4095), 1023);
        assert_eq!(to_sample(u16::MAX), SAMPLE_MAX);
    }
}
