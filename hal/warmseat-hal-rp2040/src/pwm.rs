//! Heater PWM on one RP2040 slice
//!
//! Outputs A and B of a single slice carry heater channels 0 and 1. The
//! counter wraps at 254, so a compare value equal to the 8-bit duty gives
//! 0 = always low and 255 = always high.

use embassy_rp::pwm::{Config, Pwm};
use fixed::types::extra::U4;
use fixed::FixedU16;
use warmseat_hal::{PwmChannel, PwmOutput};

/// Counter wrap value; one less than the number of duty steps
pub const PWM_TOP: u16 = 254;

/// Integer clock divider
pub const PWM_DIVIDER: u8 = 255;

/// Carrier frequency for a given system clock
pub const fn carrier_hz(sys_hz: u32) -> u32 {
    sys_hz / ((PWM_TOP as u32 + 1) * PWM_DIVIDER as u32)
}

/// Compare value for an 8-bit duty
pub const fn compare_for(duty: u8) -> u16 {
    duty as u16
}

/// Two-output PWM slice
pub struct SlicePwm<'d> {
    pwm: Pwm<'d>,
    config: Config,
}

impl<'d> SlicePwm<'d> {
    /// Slice configuration with both outputs low
    ///
    /// Pass this to the `Pwm` constructor so the pins never glitch high.
    pub fn initial_config() -> Config {
        let mut config = Config::default();
        config.top = PWM_TOP;
        config.divider = FixedU16::<U4>::from_num(PWM_DIVIDER);
        config.compare_a = 0;
        config.compare_b = 0;
        config.enable = true;
        config
    }

    /// Take over a slice created with [`SlicePwm::initial_config`]
    pub fn new(pwm: Pwm<'d>) -> Self {
        Self {
            pwm,
            config: Self::initial_config(),
        }
    }
}

impl PwmOutput for SlicePwm<'_> {
    /// Channels other than 0 (A) and 1 (B) are ignored
    fn set_duty(&mut self, channel: PwmChannel, duty: u8) {
        let compare = compare_for(duty);
        let slot = match channel.index() {
            0 => &mut self.config.compare_a,
            1 => &mut self.config.compare_b,
            _ => return,
        };
        if *slot != compare {
            *slot = compare;
            self.pwm.set_config(&self.config);
        }
    }

    /// The slice keeps counting: compare values latch only at the counter
    /// wrap, so a stopped counter could hold a pin high indefinitely.
    fn disable_all(&mut self) {
        self.config.compare_a = 0;
        self.config.compare_b = 0;
        self.pwm.set_config(&self.config);
    }
}
