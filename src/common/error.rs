// src/common/error.rs

use super::types::SensorKind;

/// Transport-level failures surfaced by the console runner.
///
/// These never reach the operator: a failing serial port cannot carry an
/// `/err:` line, so they are returned from `poll()` to the caller instead.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError<E = ()>
where
    E: core::fmt::Debug, // Needed for the generic Io error
{
    /// Underlying I/O error from the HAL implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// A write or flush did not complete in time.
    #[error("Operation timed out")]
    Timeout,

    /// A rendered response did not fit the response buffer.
    #[error("Response exceeds {capacity} byte buffer")]
    ResponseTooLong { capacity: usize },
}

/// Command-level failures. Each one is reported to the operator as a single
/// `/err: <message>` line and aborts processing of that line only.
#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// Unknown root command, unknown sub-command, or an empty line.
    #[error("Invalid command")]
    InvalidCommand,

    /// `<sensor> calibrate` given without `start`/`get`/`set`.
    #[error("{sensor} calibrate - must specify mode")]
    MissingMode { sensor: SensorKind },

    /// `<sensor> calibrate set` is short of one of its two values.
    #[error("{sensor} calibration set missing {argument}")]
    MissingArgument {
        sensor: SensorKind,
        argument: &'static str,
    },

    /// A `set` value that is not a finite number.
    #[error("{sensor} calibration set invalid {argument}")]
    InvalidNumber {
        sensor: SensorKind,
        argument: &'static str,
    },

    /// The framed line outgrew the command buffer and was discarded.
    #[error("Too many characters received. Maximum command must be {max} characters")]
    LineTooLong { max: usize },
}
