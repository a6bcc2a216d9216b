//! Battery depletion monitor
//!
//! Reads every configured feed, keeps the highest, smooths it, and
//! reports critical once the average falls below the shutdown threshold.
//! The highest feed wins because a switched-off feed reads near zero
//! rather than near the true voltage.
//!
//! Tripping is one-way. After the first critical report the average is
//! frozen and every later update reports critical again.

use heapless::Vec;
use warmseat_hal::AnalogInput;

use super::filter::DecayingAverage;
use crate::config::{BatteryConfig, BatterySource, MAX_BATTERY_SOURCES};

/// Battery condition after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryStatus {
    /// Average at or above the shutdown threshold
    Ok,
    /// Average below the threshold; outputs must be shut down
    Critical,
}

/// Result of one monitor update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryReading {
    /// Instantaneous sample (mV)
    pub sample_mv: u16,
    /// Smoothed average after this update (mV)
    pub average_mv: u16,
    /// Condition after this update
    pub status: BatteryStatus,
}

/// Battery monitor state
#[derive(Debug, Clone)]
pub struct BatteryMonitor {
    sources: Vec<BatterySource, MAX_BATTERY_SOURCES>,
    average: DecayingAverage,
    shutdown_mv: u16,
    tripped: bool,
}

impl BatteryMonitor {
    /// Create a monitor with the average at its resting value
    pub fn new(config: &BatteryConfig) -> Self {
        Self {
            sources: config.sources.clone(),
            average: DecayingAverage::new(config.initial_millivolts, config.smoothing_per_mille),
            shutdown_mv: config.shutdown_millivolts,
            tripped: false,
        }
    }

    /// Read every source and return the highest, in microvolts
    ///
    /// Returns 0 when no sources are configured.
    pub fn measure<A: AnalogInput>(&self, adc: &mut A) -> u32 {
        self.sources
            .iter()
            .map(|s| s.scale.microvolts(adc.read(s.channel, s.reference)))
            .max()
            .unwrap_or(0)
    }

    /// Fold in a sample given in microvolts
    pub fn update_uv(&mut self, sample_uv: u32) -> BatteryReading {
        let sample_mv = u16::try_from(sample_uv / 1000).unwrap_or(u16::MAX);

        if !self.tripped {
            self.average.update_uv(sample_uv);
            self.tripped = self.average.millivolts() < self.shutdown_mv;
        }

        BatteryReading {
            sample_mv,
            average_mv: self.average.millivolts(),
            status: self.status(),
        }
    }

    /// Fold in a sample given in millivolts
    pub fn update(&mut self, sample_mv: u16) -> BatteryReading {
        self.update_uv(u32::from(sample_mv) * 1000)
    }

    /// Measure and update in one step
    pub fn poll<A: AnalogInput>(&mut self, adc: &mut A) -> BatteryReading {
        let sample_uv = self.measure(adc);
        self.update_uv(sample_uv)
    }

    /// Current condition
    pub fn status(&self) -> BatteryStatus {
        if self.tripped {
            BatteryStatus::Critical
        } else {
            BatteryStatus::Ok
        }
    }

    /// Smoothed average (mV)
    pub fn average_millivolts(&self) -> u16 {
        self.average.millivolts()
    }

    /// Shutdown threshold (mV)
    pub fn shutdown_millivolts(&self) -> u16 {
        self.shutdown_mv
    }
}
