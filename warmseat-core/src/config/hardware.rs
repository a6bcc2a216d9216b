//! Hardware binding types
//!
//! These types bind the logical channels of the controller to analog
//! inputs and PWM outputs, and carry the per-input voltage calibration.

use warmseat_hal::{AnalogChannel, PwmChannel, RawSample, Reference, SAMPLE_MAX};

/// Maximum heater channels per config
pub const MAX_CHANNELS: usize = 4;

/// Maximum redundant battery feeds per config
pub const MAX_BATTERY_SOURCES: usize = 4;

/// Conversion from raw samples to millivolts
///
/// Stored as microvolts per count so divider ratios that are not whole
/// millivolts per count keep three extra digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VoltageScale {
    /// Microvolts represented by one ADC count
    pub uv_per_count: u32,
}

impl VoltageScale {
    /// Create a scale from microvolts per count
    pub const fn new(uv_per_count: u32) -> Self {
        Self { uv_per_count }
    }

    /// Create a scale from whole millivolts per count
    pub const fn from_mv_per_count(mv_per_count: u32) -> Self {
        Self::new(mv_per_count * 1000)
    }

    /// Create a scale where a full-range reading equals `full_scale_mv`
    pub const fn full_scale(full_scale_mv: u32) -> Self {
        Self::new(full_scale_mv * 1000 / (SAMPLE_MAX as u32 + 1))
    }

    /// Convert a sample to microvolts
    pub fn microvolts(&self, sample: RawSample) -> u32 {
        u32::from(sample.min(SAMPLE_MAX)).saturating_mul(self.uv_per_count)
    }

    /// Convert a sample to millivolts, truncating
    pub fn millivolts(&self, sample: RawSample) -> u16 {
        let mv = self.microvolts(sample) / 1000;
        u16::try_from(mv).unwrap_or(u16::MAX)
    }
}

/// Seat-occupied / circuit-powered detector for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnableInput {
    /// Divider tap to sample
    pub channel: AnalogChannel,
    /// Reference used when sampling
    pub reference: Reference,
    /// Calibration for the divider
    pub scale: VoltageScale,
}

impl EnableInput {
    /// Supply-referenced enable divider on `channel`
    pub const fn new(channel: AnalogChannel) -> Self {
        Self {
            channel,
            reference: Reference::Supply,
            scale: super::types::DEFAULT_ENABLE_SCALE,
        }
    }
}

/// One heating channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// Knob potentiometer wiper, read against the supply reference
    pub knob: AnalogChannel,
    /// Optional lockout input
    pub enable: Option<EnableInput>,
    /// Heater drive output
    pub output: PwmChannel,
}

impl ChannelConfig {
    /// Channel with no lockout input
    pub const fn new(knob: AnalogChannel, output: PwmChannel) -> Self {
        Self {
            knob,
            enable: None,
            output,
        }
    }

    /// Gate this channel on an enable input
    pub const fn with_enable(mut self, enable: EnableInput) -> Self {
        self.enable = Some(enable);
        self
    }
}

/// One battery voltage feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatterySource {
    /// Divider tap to sample
    pub channel: AnalogChannel,
    /// Reference used when sampling
    pub reference: Reference,
    /// Calibration for the divider
    pub scale: VoltageScale,
}

impl BatterySource {
    /// Internally-referenced battery divider on `channel`
    pub const fn new(channel: AnalogChannel) -> Self {
        Self {
            channel,
            reference: Reference::Internal,
            scale: super::types::DEFAULT_BATTERY_SCALE,
        }
    }

    /// Override the calibration
    pub const fn with_scale(mut self, scale: VoltageScale) -> Self {
        self.scale = scale;
        self
    }

    /// Override the reference
    pub const fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = reference;
        self
    }
}
