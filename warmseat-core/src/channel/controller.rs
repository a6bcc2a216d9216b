//! Hysteretic knob-to-duty tracker
//!
//! A 10-bit knob sample is reduced to an 8-bit target. The stored duty
//! follows the target only when it moves by more than the hysteresis
//! band, which hides single-count converter jitter. Near either end of
//! the knob travel the duty is snapped to 0 or 255 so the extremes are
//! always reachable even though the band would otherwise swallow the
//! last few counts.
//!
//! An optional enable divider overrides all of this: below the off
//! threshold the channel is held at zero and the knob is ignored.

use warmseat_hal::{RawSample, SAMPLE_MAX};

use crate::config::{ControlConfig, EnableInput};

/// Per-channel memory
///
/// `duty` is the only state the controller keeps between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelState {
    duty: u8,
}

impl ChannelState {
    /// Channel state at boot (output off)
    pub const fn new() -> Self {
        Self { duty: 0 }
    }

    /// Current output duty
    pub fn duty(&self) -> u8 {
        self.duty
    }

    /// Force the output off
    ///
    /// Used by the shutdown latch; normal operation goes through
    /// [`ChannelController::update`].
    pub fn clear(&mut self) {
        self.duty = 0;
    }
}

/// What an update did to the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelUpdate {
    /// Enable input below threshold; duty forced to zero
    LockedOut,
    /// Target moved by more than the band; duty follows it
    Tracked(u8),
    /// Target inside a deadband; duty snapped to the end stop
    Clamped(u8),
    /// Target within the band; duty kept
    Unchanged,
}

/// Knob-to-duty controller
///
/// Stateless apart from its tuning; the memory lives in [`ChannelState`]
/// so one controller serves every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelController {
    hysteresis: u8,
    enable_off_millivolts: u16,
}

impl ChannelController {
    /// Create a controller
    pub const fn new(hysteresis: u8, enable_off_millivolts: u16) -> Self {
        Self {
            hysteresis,
            enable_off_millivolts,
        }
    }

    /// Create a controller from the shared configuration
    pub fn from_config(config: &ControlConfig) -> Self {
        Self::new(config.hysteresis, config.enable_off_millivolts)
    }

    /// 8-bit target for a knob sample
    pub fn target(knob_sample: RawSample) -> u8 {
        // 1023 >> 2 == 255
        (knob_sample.min(SAMPLE_MAX) >> 2) as u8
    }

    /// Check whether an enable reading holds the channel off
    pub fn is_locked_out(&self, enable: &EnableInput, enable_sample: RawSample) -> bool {
        enable.scale.millivolts(enable_sample) < self.enable_off_millivolts
    }

    /// Run one update for a channel
    ///
    /// `enable` carries the channel's enable input and its fresh sample,
    /// or `None` when the channel has no lockout.
    pub fn update(
        &self,
        knob_sample: RawSample,
        enable: Option<(&EnableInput, RawSample)>,
        state: &mut ChannelState,
    ) -> ChannelUpdate {
        if let Some((input, sample)) = enable {
            if self.is_locked_out(input, sample) {
                state.duty = 0;
                return ChannelUpdate::LockedOut;
            }
        }

        let target = Self::target(knob_sample);
        let band = self.hysteresis;
        let before = state.duty;

        let tracked = target.abs_diff(state.duty) > band;
        if tracked {
            state.duty = target;
        }

        // Deadband applies whether or not the band was crossed
        if target < band {
            state.duty = 0;
        } else if target > u8::MAX - band {
            state.duty = u8::MAX;
        }

        if tracked {
            ChannelUpdate::Tracked(state.duty)
        } else if state.duty != before {
            ChannelUpdate::Clamped(state.duty)
        } else {
            ChannelUpdate::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_ENABLE_OFF_MV, DEFAULT_HYSTERESIS};
    use proptest::prelude::*;
    use warmseat_hal::AnalogChannel;

    fn controller() -> ChannelController {
        ChannelController::new(DEFAULT_HYSTERESIS, DEFAULT_ENABLE_OFF_MV)
    }

    fn enable() -> EnableInput {
        EnableInput::new(AnalogChannel(3))
    }

    fn with_duty(duty: u8) -> ChannelState {
        ChannelState { duty }
    }

    #[test]
    fn test_near_max_knob_goes_full_on() {
        let mut state = ChannelState::new();
        let result = controller().update(1020, None, &mut state);

        assert_eq!(ChannelController::target(1020), 255);
        assert_eq!(result, ChannelUpdate::Tracked(255));
        assert_eq!(state.duty(), 255);
    }

    #[test]
    fn test_small_change_ignored() {
        let mut state = with_duty(100);
        // 408 / 4 = 102, |102 - 100| = 2, not > 2
        let result = controller().update(408, None, &mut state);
        assert_eq!(result, ChannelUpdate::Unchanged);
        assert_eq!(state.duty(), 100);

        // 412 / 4 = 103 crosses the band
        let result = controller().update(412, None, &mut state);
        assert_eq!(result, ChannelUpdate::Tracked(103));
        assert_eq!(state.duty(), 103);
    }

    #[test]
    fn test_truncating_conversion() {
        assert_eq!(ChannelController::target(0), 0);
        assert_eq!(ChannelController::target(3), 0);
        assert_eq!(ChannelController::target(4), 1);
        assert_eq!(ChannelController::target(1023), 255);
        // Out-of-range samples cannot wrap
        assert_eq!(ChannelController::target(4095), 255);
    }

    #[test]
    fn test_low_deadband_reaches_zero() {
        // Duty stuck at 2 from a slow knob turn; target 1 is inside the band
        let mut state = with_duty(2);
        let result = controller().update(4, None, &mut state);
        assert_eq!(result, ChannelUpdate::Clamped(0));
        assert_eq!(state.duty(), 0);
    }

    #[test]
    fn test_high_deadband_reaches_full() {
        let mut state = with_duty(252);
        // 1016 / 4 = 254 > 253
        let result = controller().update(1016, None, &mut state);
        assert_eq!(result, ChannelUpdate::Clamped(255));
        assert_eq!(state.duty(), 255);
    }

    #[test]
    fn test_deadband_after_tracking() {
        // Large jump to target 1: tracking fires, then the clamp zeroes it
        let mut state = with_duty(200);
        let result = controller().update(4, None, &mut state);
        assert_eq!(result, ChannelUpdate::Tracked(0));
        assert_eq!(state.duty(), 0);
    }

    #[test]
    fn test_lockout_ignores_knob() {
        let mut state = with_duty(180);
        let result = controller().update(1023, Some((&enable(), 100)), &mut state);
        assert_eq!(result, ChannelUpdate::LockedOut);
        assert_eq!(state.duty(), 0);
    }

    #[test]
    fn test_enabled_channel_tracks() {
        let mut state = ChannelState::new();
        // 900 counts on a 5 V rail is ~4.4 V
        let result = controller().update(600, Some((&enable(), 900)), &mut state);
        assert_eq!(result, ChannelUpdate::Tracked(150));
    }

    #[test]
    fn test_lockout_threshold_edge() {
        let c = controller();
        // 205 counts = 1000 mV, not below the 1000 mV threshold
        assert!(!c.is_locked_out(&enable(), 205));
        assert!(c.is_locked_out(&enable(), 204));
    }

    #[test]
    fn test_clear() {
        let mut state = with_duty(77);
        state.clear();
        assert_eq!(state, ChannelState::new());
    }

    proptest! {
        #[test]
        fn prop_duty_moves_only_past_band_or_in_deadband(
            hyst in 0u8..=5,
            start in any::<u8>(),
            samples in proptest::collection::vec(0u16..=1023, 1..64),
        ) {
            let c = ChannelController::new(hyst, DEFAULT_ENABLE_OFF_MV);
            let mut state = with_duty(start);

            for sample in samples {
                let before = state.duty();
                let target = ChannelController::target(sample);
                c.update(sample, None, &mut state);
                let after = state.duty();

                if target < hyst {
                    prop_assert_eq!(after, 0);
                } else if target > u8::MAX - hyst {
                    prop_assert_eq!(after, 255);
                } else if target.abs_diff(before) > hyst {
                    prop_assert_eq!(after, target);
                } else {
                    prop_assert_eq!(after, before);
                }
            }
        }

        #[test]
        fn prop_lockout_always_zero(
            start in any::<u8>(),
            knob in 0u16..=1023,
            enable_sample in 0u16..=204,
        ) {
            let mut state = with_duty(start);
            let result = controller().update(knob, Some((&enable(), enable_sample)), &mut state);
            prop_assert_eq!(result, ChannelUpdate::LockedOut);
            prop_assert_eq!(state.duty(), 0);
        }
    }
}
