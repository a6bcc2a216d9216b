//! Safety shutdown
//!
//! The terminal safe state entered on battery depletion or a rejected
//! configuration.

pub mod latch;

pub use latch::{Halt, ShutdownLatch};
