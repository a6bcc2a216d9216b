//! Fixed-cadence control loop
//!
//! One iteration updates every heater channel in order, then the battery
//! monitor. The caller owns timing: it sleeps for the configured cadence
//! between [`ControlLoop::step`] calls and idles forever once a step
//! returns [`Step::Halt`].

pub mod board;
pub mod main_loop;

pub use board::Board;
pub use main_loop::{ControlLoop, Step};
