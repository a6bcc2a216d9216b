//! Controller state machine
//!
//! Boot, run, and the terminal shutdown state. The machine is explicit,
//! finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ShutdownReason, State};
