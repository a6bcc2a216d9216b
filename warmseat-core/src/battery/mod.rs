//! Battery protection
//!
//! Smooths the supply voltage and decides when the battery is too
//! depleted to keep heating.

pub mod filter;
pub mod monitor;

pub use filter::DecayingAverage;
pub use monitor::{BatteryMonitor, BatteryStatus};
