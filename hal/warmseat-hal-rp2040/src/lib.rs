//! RP2040 bindings for the seat heater firmware
//!
//! This crate implements the `warmseat-hal` traits on top of `embassy-rp`:
//!
//! - [`adc::AdcBank`] - blocking ADC reads, normalised to 10 bits
//! - [`pwm::SlicePwm`] - two 8-bit heater outputs on one PWM slice
//! - [`reset::reset_cause`] - last reset reason from the watchdog block
//!
//! GPIO and UART need no chip-specific code: `embassy-rp` drivers already
//! implement `embedded-hal` / `embedded-io`, so the generic
//! [`warmseat_hal::EhOutput`] and [`warmseat_hal::IoUart`] adapters cover
//! them.

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod pwm;
pub mod reset;

pub use adc::{AdcBank, AdcChannel};
pub use pwm::SlicePwm;
pub use reset::reset_cause;
