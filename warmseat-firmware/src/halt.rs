//! Shutdown idle
//!
//! Nothing is resumable from here. The heater outputs are already off;
//! this keeps the fault LED lit and lets the executor sleep between
//! refreshes. The board is held rather than dropped: dropping the PWM
//! driver would hand the heater pins back to the pad default and let the
//! MOSFET gates float.

use defmt::*;
use embassy_time::Timer;

use warmseat_core::control::Board;
use warmseat_core::safety::{Halt, ShutdownLatch};
use warmseat_hal::OutputPin;

/// Idle forever with the fault indicator asserted
pub async fn idle_forever<A, P, C, F: OutputPin>(
    mut board: Board<A, P, C, F>,
    halt: Halt,
    interval_ms: u32,
) {
    warn!("Halted: {}", halt.reason());

    loop {
        ShutdownLatch::reassert(&mut board.fault);
        Timer::after_millis(u64::from(interval_ms)).await;
    }
}
