//! Warmseat - Seat Heater Controller Firmware
//!
//! Main firmware binary for RP2040-based heater boards. One loop samples
//! the knobs and battery feeds at a fixed cadence and drives the heater
//! outputs; a depleted battery latches everything off until power cycle.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{Config as UartConfig, UartTx};
use embassy_rp::watchdog::Watchdog;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use warmseat_core::config::DEFAULT_FAULT_REASSERT_MS;
use warmseat_core::control::{Board, ControlLoop, Step};
use warmseat_core::safety::ShutdownLatch;
use warmseat_core::state::ShutdownReason;
use warmseat_hal::{EhOutput, IoUart, UartConsole};
use warmseat_hal_rp2040::{reset_cause, AdcBank, AdcChannel, SlicePwm};

mod board;
mod halt;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Warmseat firmware starting...");

    let p = embassy_rp::init(Default::default());

    let reset = reset_cause(&Watchdog::new(p.WATCHDOG));
    info!("Reset cause: {}", reset);

    // Heater pins come up at zero duty before anything else runs
    let pwm = SlicePwm::new(Pwm::new_output_ab(
        p.PWM_SLICE4,
        p.PIN_8,
        p.PIN_9,
        SlicePwm::initial_config(),
    ));

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = board::CONSOLE.baudrate;
    let console = UartConsole::new(IoUart(UartTx::new_blocking(p.UART0, p.PIN_0, uart_config)));

    let adc = AdcBank::new(Adc::new_blocking(p.ADC, AdcConfig::default()))
        .with_channel(AdcChannel::Adc0, Channel::new_pin(p.PIN_26, Pull::None))
        .with_channel(AdcChannel::Adc1, Channel::new_pin(p.PIN_27, Pull::None))
        .with_channel(AdcChannel::Adc2, Channel::new_pin(p.PIN_28, Pull::None))
        .with_channel(AdcChannel::Adc3, Channel::new_pin(p.PIN_29, Pull::None));

    let fault = EhOutput::new(Output::new(p.PIN_25, Level::Low));

    let mut board = Board::new(adc, pwm, console, fault);
    info!("Peripherals initialized");

    let config = match board::control_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Board configuration failed: {}", e);
            let halt = ShutdownLatch::engage(
                &mut board.pwm,
                &mut board.fault,
                core::iter::empty(),
                ShutdownReason::ConfigInvalid,
            );
            halt::idle_forever(board, halt, DEFAULT_FAULT_REASSERT_MS).await;
            return;
        }
    };

    let mut control = ControlLoop::new(&config, reset);
    if let Err(halt) = control.boot(&mut board) {
        error!("Boot rejected configuration");
        halt::idle_forever(board, halt, config.timing.fault_reassert_ms).await;
        return;
    }

    // Let the supply settle before the first knob reading
    Timer::after_millis(u64::from(config.timing.settle_ms)).await;
    info!(
        "Control loop running: {} channels, {} ms cadence",
        config.channels.len(),
        config.timing.cadence_ms
    );

    let halt = loop {
        match control.step(&mut board) {
            Step::Continue => Timer::after_millis(u64::from(config.timing.cadence_ms)).await,
            Step::Halt(halt) => {
                error!(
                    "{} after {} iterations, average {} mV",
                    halt.reason(),
                    control.iterations(),
                    control.battery_millivolts()
                );
                break halt;
            }
        }
    };

    halt::idle_forever(board, halt, config.timing.fault_reassert_ms).await;
}
