//! Fixed-point exponential moving average
//!
//! `avg = avg * (1 - α) + sample * α`, with α in parts per thousand.
//!
//! The accumulator holds microvolts while the public value is in
//! millivolts. Each step rounds half up at microvolt resolution, so from
//! a whole-millivolt start one step equals the millivolt formula rounded
//! to nearest. The extra digits let the average settle within 1 mV of a
//! constant input; a millivolt accumulator at α = 0.01 would stop moving
//! up to 50 mV away.

/// First-order IIR low-pass filter over millivolt readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecayingAverage {
    /// Current average in microvolts
    acc_uv: u32,
    /// α × 1000
    alpha_per_mille: u16,
}

impl DecayingAverage {
    /// Start the average at `initial_mv`
    ///
    /// `alpha_per_mille` is clamped to 1..=1000.
    pub fn new(initial_mv: u16, alpha_per_mille: u16) -> Self {
        Self {
            acc_uv: u32::from(initial_mv) * 1000,
            alpha_per_mille: alpha_per_mille.clamp(1, 1000),
        }
    }

    /// Fold in one sample given in microvolts
    pub fn update_uv(&mut self, sample_uv: u32) {
        let alpha = u64::from(self.alpha_per_mille);
        let keep = 1000 - alpha;
        let mixed = u64::from(self.acc_uv) * keep + u64::from(sample_uv) * alpha;
        // Bounded by max(acc, sample), so it always fits back in u32
        self.acc_uv = ((mixed + 500) / 1000) as u32;
    }

    /// Fold in one sample given in millivolts
    pub fn update(&mut self, sample_mv: u16) {
        self.update_uv(u32::from(sample_mv) * 1000);
    }

    /// Average rounded to the nearest millivolt
    pub fn millivolts(&self) -> u16 {
        let mv = (u64::from(self.acc_uv) + 500) / 1000;
        u16::try_from(mv).unwrap_or(u16::MAX)
    }

    /// Average at full resolution
    pub fn microvolts(&self) -> u32 {
        self.acc_uv
    }
}
