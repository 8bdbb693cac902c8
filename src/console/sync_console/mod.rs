// src/console/sync_console/mod.rs

use crate::common::{
    config::ConsoleConfig,
    error::{CommandError, ConsoleError},
    frame::MAX_COMMAND_LEN,
    hal_traits::{ConsoleSerial, ConsoleTimer},
    types::{EcCalibration, PhCalibration},
};
use core::convert::Infallible;
use core::fmt::Debug;

use super::{
    context::CommandContext,
    handler::{CalibratedProbe, Sensors, TurbiditySensor},
    parser::parse_command,
    response::Response,
};

mod dispatch;
mod io_helpers;

#[cfg(test)]
pub(crate) mod mock;

/// Outcome of one [`SyncConsole::poll`] call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PollStatus {
    /// No command started: the port was empty or a stray byte was dropped.
    Idle,
    /// A command line was framed and executed.
    Executed,
    /// A command line was framed but answered with an `/err:` line.
    Rejected,
}

/// Result of trying to frame one command line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum FramedLine {
    /// Nothing to frame yet.
    Idle,
    /// The command context holds a complete line.
    Complete,
    /// The line outgrew the buffer and was discarded.
    Overflow,
}

/// A text-command console running SYNCHRONOUSLY over a polled serial port.
///
/// Single cooperative context: each [`poll`](Self::poll) frames at most one
/// line, dispatches it, and writes every response line before returning.
#[derive(Debug)]
pub struct SyncConsole<IF, PH, EC, TB>
where
    IF: ConsoleSerial + ConsoleTimer,
    IF::Error: Debug,
{
    interface: IF,
    sensors: Sensors<PH, EC, TB>,
    context: CommandContext,
    config: ConsoleConfig,
}

impl<IF, PH, EC, TB> SyncConsole<IF, PH, EC, TB>
where
    IF: ConsoleSerial + ConsoleTimer,
    IF::Error: Debug,
    PH: CalibratedProbe<Calibration = PhCalibration>,
    EC: CalibratedProbe<Calibration = EcCalibration>,
    TB: TurbiditySensor,
{
    pub fn new(interface: IF, sensors: Sensors<PH, EC, TB>) -> Self {
        Self::with_config(interface, sensors, ConsoleConfig::default())
    }

    pub fn with_config(interface: IF, sensors: Sensors<PH, EC, TB>, config: ConsoleConfig) -> Self {
        log::info!(
            "console ready (max command {} bytes, timeout {} ms)",
            MAX_COMMAND_LEN,
            config.inactivity_timeout.as_millis()
        );
        SyncConsole {
            interface,
            sensors,
            context: CommandContext::new(),
            config,
        }
    }

    /// Services the port once.
    ///
    /// Returns immediately when no byte is waiting. Once a `/` arrives this
    /// blocks until the line is terminated, the inactivity timeout expires,
    /// or the line overflows, then runs the command to completion.
    ///
    /// # Errors
    ///
    /// Only transport failures are returned. Malformed commands are answered
    /// on the port and reported as [`PollStatus::Rejected`].
    pub fn poll(&mut self) -> Result<PollStatus, ConsoleError<IF::Error>> {
        match self.read_command_line()? {
            FramedLine::Idle => Ok(PollStatus::Idle),
            FramedLine::Overflow => {
                let err = CommandError::LineTooLong {
                    max: MAX_COMMAND_LEN,
                };
                log::warn!("command line discarded: {}", err);
                self.respond(&Response::Error(err))?;
                Ok(PollStatus::Rejected)
            }
            FramedLine::Complete => {
                // Lend the buffer out so the command can borrow it while the
                // console is mutated, then hand it back for the next line.
                let context = core::mem::take(&mut self.context);
                let status = self.process_line(context.as_bytes());
                self.context = context;
                status
            }
        }
    }

    /// Polls forever. Only a transport failure ends the loop.
    pub fn run(&mut self) -> Result<Infallible, ConsoleError<IF::Error>> {
        loop {
            self.poll()?;
        }
    }

    fn process_line(&mut self, line: &[u8]) -> Result<PollStatus, ConsoleError<IF::Error>> {
        log::debug!(
            "command received: {:?}",
            core::str::from_utf8(line).unwrap_or("<non-utf8>")
        );

        match parse_command(line) {
            Ok(command) => {
                match command.sensor() {
                    Some(sensor) if command.mutates_calibration() => {
                        log::info!("{} calibration command: `{}`", sensor, command);
                    }
                    _ => log::debug!("executing `{}`", command),
                }
                self.execute(&command)?;
                Ok(PollStatus::Executed)
            }
            Err(err) => {
                log::warn!("command rejected: {}", err);
                self.respond(&Response::Error(err))?;
                Ok(PollStatus::Rejected)
            }
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn sensors(&self) -> &Sensors<PH, EC, TB> {
        &self.sensors
    }

    pub fn sensors_mut(&mut self) -> &mut Sensors<PH, EC, TB> {
        &mut self.sensors
    }

    pub fn interface(&self) -> &IF {
        &self.interface
    }

    pub fn interface_mut(&mut self) -> &mut IF {
        &mut self.interface
    }

    /// Returns the interface and sensors.
    pub fn release(self) -> (IF, Sensors<PH, EC, TB>) {
        (self.interface, self.sensors)
    }
}
