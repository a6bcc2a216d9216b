//! Warmseat Hardware Abstraction Layer
//!
//! This crate defines the peripheral capabilities the control loop is
//! allowed to touch. Chip-specific crates implement them; host tests
//! implement them with fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  warmseat-core (control loop)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  warmseat-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ warmseat-hal- │       │  test fakes   │
//! │    rp2040     │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`adc::AnalogInput`] - Blocking analog sampling
//! - [`pwm::PwmOutput`] - 8-bit duty outputs
//! - [`gpio::OutputPin`] - Digital output (fault indicator)
//! - [`uart::UartTx`] - Serial transmit
//! - [`console::Console`] - Diagnostic text lines
//!
//! [`reset::ResetCause`] carries the chip's last reset reason into the
//! boot diagnostic.

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod console;
pub mod gpio;
pub mod pwm;
pub mod reset;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::{AnalogChannel, AnalogInput, RawSample, Reference, SAMPLE_MAX};
pub use console::{Console, UartConsole};
pub use gpio::{EhOutput, OutputPin};
pub use pwm::{PwmChannel, PwmOutput};
pub use reset::ResetCause;
pub use uart::{IoUart, UartTx};
