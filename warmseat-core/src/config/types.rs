//! Configuration type definitions
//!
//! Defaults match the two-knob reference board: two knobs,
//! one battery divider at 11 mV per count, 200 ms cadence.

use heapless::Vec;

use super::hardware::{
    BatterySource, ChannelConfig, VoltageScale, MAX_BATTERY_SOURCES, MAX_CHANNELS,
};

/// Minimum knob change (in 8-bit duty counts) that moves the output
pub const DEFAULT_HYSTERESIS: u8 = 2;

/// Enable inputs below this read as "seat off"
pub const DEFAULT_ENABLE_OFF_MV: u16 = 1000;

/// Starting battery average, chosen so a noisy first sample cannot trip
pub const DEFAULT_INITIAL_MV: u16 = 13_500;

/// Battery average below which the controller latches off
pub const DEFAULT_SHUTDOWN_MV: u16 = 10_200;

/// Smoothing factor α in parts per thousand (0.01)
pub const DEFAULT_SMOOTHING_PER_MILLE: u16 = 10;

/// Loop period
pub const DEFAULT_CADENCE_MS: u32 = 200;

/// Delay between boot and the first sample
pub const DEFAULT_SETTLE_MS: u32 = 1000;

/// Fault indicator refresh period while shut down
pub const DEFAULT_FAULT_REASSERT_MS: u32 = 1000;

/// Battery divider calibration on the internal reference
pub const DEFAULT_BATTERY_SCALE: VoltageScale = VoltageScale::from_mv_per_count(11);

/// Enable divider calibration on a 5 V supply reference
pub const DEFAULT_ENABLE_SCALE: VoltageScale = VoltageScale::full_scale(5000);

/// Upper bound for the hysteresis band; beyond this the deadbands overlap
pub const MAX_HYSTERESIS: u8 = 127;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No heater channel configured
    NoChannels,
    /// More than [`MAX_CHANNELS`] channels
    TooManyChannels,
    /// No battery source configured
    NoBatterySources,
    /// More than [`MAX_BATTERY_SOURCES`] sources
    TooManyBatterySources,
    /// Hysteresis above [`MAX_HYSTERESIS`]
    HysteresisTooLarge,
    /// Smoothing factor outside 1..=1000 per mille
    SmoothingOutOfRange,
    /// Shutdown threshold at or above the initial average
    ShutdownAboveInitial,
    /// Loop cadence of zero
    ZeroCadence,
    /// Fault reassert interval of zero
    ZeroFaultInterval,
    /// A calibration scale of zero microvolts per count
    ZeroScale,
    /// Two channels drive the same PWM output
    DuplicateOutput,
}

/// Battery protection settings
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryConfig {
    /// Redundant feeds; the highest reading wins
    pub sources: Vec<BatterySource, MAX_BATTERY_SOURCES>,
    /// Average at boot (mV)
    pub initial_millivolts: u16,
    /// Latch off when the average drops below this (mV)
    pub shutdown_millivolts: u16,
    /// Smoothing factor α in parts per thousand
    pub smoothing_per_mille: u16,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            initial_millivolts: DEFAULT_INITIAL_MV,
            shutdown_millivolts: DEFAULT_SHUTDOWN_MV,
            smoothing_per_mille: DEFAULT_SMOOTHING_PER_MILLE,
        }
    }
}

/// Loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Idle time between iterations (ms)
    pub cadence_ms: u32,
    /// Hardware settle time after boot (ms)
    pub settle_ms: u32,
    /// Fault indicator refresh period in shutdown (ms)
    pub fault_reassert_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            cadence_ms: DEFAULT_CADENCE_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            fault_reassert_ms: DEFAULT_FAULT_REASSERT_MS,
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlConfig {
    /// Heater channels, updated in order every iteration
    pub channels: Vec<ChannelConfig, MAX_CHANNELS>,
    /// Battery protection
    pub battery: BatteryConfig,
    /// Loop timing
    pub timing: TimingConfig,
    /// Hysteresis band in duty counts
    pub hysteresis: u8,
    /// Enable inputs below this read as off (mV)
    pub enable_off_millivolts: u16,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlConfig {
    /// Defaults with no channels or battery sources
    pub fn new() -> Self {
        Self {
            channels: Vec::new(),
            battery: BatteryConfig::default(),
            timing: TimingConfig::default(),
            hysteresis: DEFAULT_HYSTERESIS,
            enable_off_millivolts: DEFAULT_ENABLE_OFF_MV,
        }
    }

    /// Append a heater channel
    pub fn add_channel(&mut self, channel: ChannelConfig) -> Result<(), ConfigError> {
        self.channels
            .push(channel)
            .map_err(|_| ConfigError::TooManyChannels)
    }

    /// Append a battery feed
    pub fn add_battery_source(&mut self, source: BatterySource) -> Result<(), ConfigError> {
        self.battery
            .sources
            .push(source)
            .map_err(|_| ConfigError::TooManyBatterySources)
    }

    /// Check the configuration describes a usable controller
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        if self.battery.sources.is_empty() {
            return Err(ConfigError::NoBatterySources);
        }
        if self.hysteresis > MAX_HYSTERESIS {
            return Err(ConfigError::HysteresisTooLarge);
        }
        if !(1..=1000).contains(&self.battery.smoothing_per_mille) {
            return Err(ConfigError::SmoothingOutOfRange);
        }
        if self.battery.shutdown_millivolts >= self.battery.initial_millivolts {
            return Err(ConfigError::ShutdownAboveInitial);
        }
        if self.timing.cadence_ms == 0 {
            return Err(ConfigError::ZeroCadence);
        }
        if self.timing.fault_reassert_ms == 0 {
            return Err(ConfigError::ZeroFaultInterval);
        }

        let enable_scales = self
            .channels
            .iter()
            .filter_map(|c| c.enable.map(|e| e.scale));
        let battery_scales = self.battery.sources.iter().map(|s| s.scale);
        if enable_scales
            .chain(battery_scales)
            .any(|s| s.uv_per_count == 0)
        {
            return Err(ConfigError::ZeroScale);
        }

        for (i, a) in self.channels.iter().enumerate() {
            if self.channels[i + 1..].iter().any(|b| b.output == a.output) {
                return Err(ConfigError::DuplicateOutput);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnableInput;
    use warmseat_hal::{AnalogChannel, PwmChannel};

    fn two_channel() -> ControlConfig {
        let mut config = ControlConfig::new();
        config
            .add_channel(ChannelConfig::new(AnalogChannel(1), PwmChannel(0)))
            .unwrap();
        config
            .add_channel(ChannelConfig::new(AnalogChannel(2), PwmChannel(1)))
            .unwrap();
        config
            .add_battery_source(BatterySource::new(AnalogChannel(5)))
            .unwrap();
        config
    }

    #[test]
    fn test_defaults_valid() {
        assert_eq!(two_channel().validate(), Ok(()));
    }

    #[test]
    fn test_empty_rejected() {
        let mut config = ControlConfig::new();
        assert_eq!(config.validate(), Err(ConfigError::NoChannels));

        config
            .add_channel(ChannelConfig::new(AnalogChannel(1), PwmChannel(0)))
            .unwrap();
        assert_eq!(config.validate(), Err(ConfigError::NoBatterySources));
    }

    #[test]
    fn test_capacity() {
        let mut config = ControlConfig::new();
        for i in 0..MAX_CHANNELS as u8 {
            config
                .add_channel(ChannelConfig::new(AnalogChannel(i), PwmChannel(i)))
                .unwrap();
        }
        assert_eq!(
            config.add_channel(ChannelConfig::new(AnalogChannel(7), PwmChannel(7))),
            Err(ConfigError::TooManyChannels)
        );
    }

    #[test]
    fn test_bad_tunables() {
        let mut config = two_channel();
        config.hysteresis = 128;
        assert_eq!(config.validate(), Err(ConfigError::HysteresisTooLarge));

        let mut config = two_channel();
        config.battery.smoothing_per_mille = 0;
        assert_eq!(config.validate(), Err(ConfigError::SmoothingOutOfRange));
        config.battery.smoothing_per_mille = 1001;
        assert_eq!(config.validate(), Err(ConfigError::SmoothingOutOfRange));

        let mut config = two_channel();
        config.battery.shutdown_millivolts = config.battery.initial_millivolts;
        assert_eq!(config.validate(), Err(ConfigError::ShutdownAboveInitial));

        let mut config = two_channel();
        config.timing.cadence_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroCadence));

        let mut config = two_channel();
        config.timing.fault_reassert_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFaultInterval));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut config = two_channel();
        let mut enable = EnableInput::new(AnalogChannel(3));
        enable.scale = VoltageScale::new(0);
        config.channels[0] = config.channels[0].with_enable(enable);
        assert_eq!(config.validate(), Err(ConfigError::ZeroScale));
    }

    #[test]
    fn test_duplicate_output_rejected() {
        let mut config = two_channel();
        config.channels[1].output = PwmChannel(0);
        assert_eq!(config.validate(), Err(ConfigError::DuplicateOutput));
    }
}
