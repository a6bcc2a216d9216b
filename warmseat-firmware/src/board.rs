//! Board wiring and calibration
//!
//! Pin assignments (heater board rev B):
//! - GPIO26 / ADC0: driver seat knob
//! - GPIO27 / ADC1: passenger seat knob
//! - GPIO28 / ADC2: battery feed 1 (ignition), 100k/10k divider
//! - GPIO29 / ADC3: battery feed 2 (accessory), 100k/10k divider
//! - GPIO8 / PWM4A: driver heater MOSFET
//! - GPIO9 / PWM4B: passenger heater MOSFET
//! - GPIO0 / UART0 TX: diagnostic console
//! - GPIO25: fault LED
//!
//! All four ADC pins are taken, so this revision has no seat-occupied
//! inputs; both channels run ungated.

use warmseat_core::config::{
    BatterySource, ChannelConfig, ConfigError, ControlConfig, VoltageScale,
};
use warmseat_hal::uart::UartConfig;
use warmseat_hal::{PwmChannel, Reference};
use warmseat_hal_rp2040::AdcChannel;

/// Diagnostic console settings
pub const CONSOLE: UartConfig = UartConfig { baudrate: 9600 };

/// ADC_VREF rail (mV)
const ADC_VREF_MV: u32 = 3300;

/// 100k over 10k: the ADC sees 1/11 of the feed
const BATTERY_DIVIDER: u32 = 11;

/// ~35.4 mV per 10-bit count
pub const BATTERY_SCALE: VoltageScale = VoltageScale::full_scale(ADC_VREF_MV * BATTERY_DIVIDER);

/// Assemble the controller configuration for this board
pub fn control_config() -> Result<ControlConfig, ConfigError> {
    let mut config = ControlConfig::new();

    config.add_channel(ChannelConfig::new(AdcChannel::Adc0.logical(), PwmChannel(0)))?;
    config.add_channel(ChannelConfig::new(AdcChannel::Adc1.logical(), PwmChannel(1)))?;

    for feed in [AdcChannel::Adc2, AdcChannel::Adc3] {
        config.add_battery_source(
            BatterySource::new(feed.logical())
                .with_reference(Reference::Supply)
                .with_scale(BATTERY_SCALE),
        )?;
    }

    Ok(config)
}
