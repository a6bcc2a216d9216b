//! Control loop driver
//!
//! Owns every piece of controller memory: one [`ChannelState`] per
//! channel, the [`BatteryMonitor`], and the [`State`]. Peripherals come
//! in through a [`Board`] on each call.

use heapless::Vec;
use warmseat_hal::{AnalogInput, Console, OutputPin, PwmOutput, Reference, ResetCause};

use super::board::Board;
use crate::battery::{BatteryMonitor, BatteryStatus};
use crate::channel::{ChannelController, ChannelState, ChannelUpdate};
use crate::config::{ControlConfig, MAX_CHANNELS};
use crate::safety::{Halt, ShutdownLatch};
use crate::state::{Event, ShutdownReason, State};

/// Knobs are wipers across the supply rail
const KNOB_REFERENCE: Reference = Reference::Supply;

/// Outcome of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Sleep for the cadence and call again
    Continue,
    /// Outputs are off; idle forever
    Halt(Halt),
}

/// The controller
pub struct ControlLoop<'c> {
    config: &'c ControlConfig,
    reset_cause: ResetCause,
    controller: ChannelController,
    channels: Vec<ChannelState, MAX_CHANNELS>,
    battery: BatteryMonitor,
    state: State,
    halt: Option<Halt>,
    iterations: u32,
}

impl<'c> ControlLoop<'c> {
    /// Create the controller with every output at zero
    ///
    /// `reset_cause` is reported in the boot diagnostic.
    pub fn new(config: &'c ControlConfig, reset_cause: ResetCause) -> Self {
        let mut channels = Vec::new();
        for _ in config.channels.iter() {
            // Capacity matches the config's own channel list
            let _ = channels.push(ChannelState::new());
        }

        Self {
            config,
            reset_cause,
            controller: ChannelController::from_config(config),
            channels,
            battery: BatteryMonitor::new(&config.battery),
            state: State::Boot,
            halt: None,
            iterations: 0,
        }
    }

    /// Announce the firmware and check the configuration
    ///
    /// An invalid configuration engages the shutdown latch. Calling this
    /// again after boot has no effect.
    pub fn boot<A, P, C, F>(&mut self, board: &mut Board<A, P, C, F>) -> Result<(), Halt>
    where
        A: AnalogInput,
        P: PwmOutput,
        C: Console,
        F: OutputPin,
    {
        if let Some(halt) = self.halt {
            return Err(halt);
        }
        if self.state == State::Running {
            return Ok(());
        }

        board.console.write_fmt_line(format_args!(
            "warmseat {} boot, reset {:?}, {} channels",
            env!("CARGO_PKG_VERSION"),
            self.reset_cause,
            self.config.channels.len()
        ));

        if let Err(e) = self.config.validate() {
            board
                .console
                .write_fmt_line(format_args!("config rejected: {:?}", e));
            return Err(self.shut_down(board, ShutdownReason::ConfigInvalid));
        }

        for (channel, state) in self.config.channels.iter().zip(self.channels.iter()) {
            board.pwm.set_duty(channel.output, state.duty());
        }

        self.state = self.state.transition(Event::BootComplete);
        Ok(())
    }

    /// Run one iteration
    ///
    /// Boots first if [`ControlLoop::boot`] has not been called. Once
    /// halted, returns the same [`Step::Halt`] forever without touching
    /// any peripheral.
    pub fn step<A, P, C, F>(&mut self, board: &mut Board<A, P, C, F>) -> Step
    where
        A: AnalogInput,
        P: PwmOutput,
        C: Console,
        F: OutputPin,
    {
        if let Err(halt) = self.boot(board) {
            return Step::Halt(halt);
        }

        self.iterations = self.iterations.wrapping_add(1);
        self.update_channels(board);

        let reading = self.battery.poll(&mut board.adc);
        board.console.write_fmt_line(format_args!(
            "v:{} avg:{}",
            reading.sample_mv, reading.average_mv
        ));

        if reading.status == BatteryStatus::Critical {
            board.console.write_fmt_line(format_args!(
                "battery critical: {} mV < {} mV, shutting down",
                reading.average_mv,
                self.battery.shutdown_millivolts()
            ));
            return Step::Halt(self.shut_down(board, ShutdownReason::BatteryCritical));
        }

        Step::Continue
    }

    fn update_channels<A, P, C, F>(&mut self, board: &mut Board<A, P, C, F>)
    where
        A: AnalogInput,
        P: PwmOutput,
        C: Console,
        F: OutputPin,
    {
        let config = self.config;
        for (index, (channel, state)) in config
            .channels
            .iter()
            .zip(self.channels.iter_mut())
            .enumerate()
        {
            let knob = board.adc.read(channel.knob, KNOB_REFERENCE);
            let enable = channel
                .enable
                .as_ref()
                .map(|input| (input, board.adc.read(input.channel, input.reference)));

            let update = self.controller.update(knob, enable, state);
            board.pwm.set_duty(channel.output, state.duty());

            if let ChannelUpdate::Tracked(duty) = update {
                board
                    .console
                    .write_fmt_line(format_args!("ch {} knob {} duty {}", index, knob, duty));
            }
        }
    }

    fn shut_down<A, P, C, F>(&mut self, board: &mut Board<A, P, C, F>, reason: ShutdownReason) -> Halt
    where
        A: AnalogInput,
        P: PwmOutput,
        C: Console,
        F: OutputPin,
    {
        for state in self.channels.iter_mut() {
            state.clear();
        }

        let config = self.config;
        let outputs = config.channels.iter().map(|c| c.output);
        let halt = ShutdownLatch::engage(&mut board.pwm, &mut board.fault, outputs, reason);

        self.state = self.state.transition(Event::FaultDetected(reason));
        self.halt = Some(halt);
        halt
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Current duty of channel `index`
    pub fn duty(&self, index: usize) -> Option<u8> {
        self.channels.get(index).map(ChannelState::duty)
    }

    /// Smoothed battery voltage (mV)
    pub fn battery_millivolts(&self) -> u16 {
        self.battery.average_millivolts()
    }

    /// Iterations run since boot
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}
