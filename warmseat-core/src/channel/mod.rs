//! Heater channels
//!
//! Knob position to PWM duty, one channel at a time.

pub mod controller;

pub use controller::{ChannelController, ChannelState, ChannelUpdate};
