//! Configuration types
//!
//! All tunables live in one [`ControlConfig`] built once at startup and
//! passed by reference into each component.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
