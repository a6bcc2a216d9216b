//! Board-agnostic control logic for the seat heater firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Per-channel duty tracking with hysteresis, deadband and lockout
//! - Battery voltage smoothing and the critical-depletion decision
//! - The run/shutdown state machine and the shutdown latch
//! - The fixed-cadence control loop that ties them together
//! - Configuration type definitions
//!
//! Peripherals are reached only through the `warmseat-hal` traits, so
//! everything here runs against fakes on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod battery;
pub mod channel;
pub mod config;
pub mod control;
pub mod safety;
pub mod state;
