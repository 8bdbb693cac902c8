// src/console/response.rs

use core::fmt;

use crate::common::{command::EchoPayload, error::CommandError, types::SensorKind};

/// Usage block printed by `turb help`, one response line per entry.
pub(crate) const TURBIDITY_USAGE: [&str; 4] = [
    "turb",
    "turb calibrate get",
    "turb calibrate set <slope> <intercept>",
    "turb help",
];

/// One line of console output.
///
/// The `Display` implementation renders the line without its CR/LF. Every
/// line starts with `/<namespace>` or `/err:`, and numeric values always
/// carry exactly four decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response<'a> {
    /// `/<ns> <value>`
    Reading { sensor: SensorKind, value: f32 },
    /// `/echo <payload>`
    Echo(EchoPayload<'a>),
    /// `/<ns> calibration data <first> <second>`
    CalibrationData {
        sensor: SensorKind,
        first: f32,
        second: f32,
    },
    /// `/<ns> calibration set success`
    CalibrationStored { sensor: SensorKind },
    /// `/<ns> calibrate start`
    CalibrationStarted { sensor: SensorKind },
    /// `/<ns>: calibration <field> from <old> to <new>`
    CalibrationChanged {
        sensor: SensorKind,
        field: &'static str,
        from: f32,
        to: f32,
    },
    /// `/<ns>: calibration values unchanged`
    CalibrationUnchanged { sensor: SensorKind },
    /// `/<ns> calibrate end`
    CalibrationEnded { sensor: SensorKind },
    /// `/<ns> usage: <text>`
    Usage {
        sensor: SensorKind,
        text: &'static str,
    },
    /// `/err: <description>`
    Error(CommandError),
}

impl fmt::Display for Response<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Reading { sensor, value } => write!(f, "/{} {:.4}", sensor, value),
            Response::Echo(payload) => write!(f, "/echo {}", payload),
            Response::CalibrationData {
                sensor,
                first,
                second,
            } => {
                write!(f, "/{} calibration data {:.4} {:.4}", sensor, first, second)
            }
            Response::CalibrationStored { sensor } => {
                write!(f, "/{} calibration set success", sensor)
            }
            Response::CalibrationStarted { sensor } => write!(f, "/{} calibrate start", sensor),
            Response::CalibrationChanged {
                sensor,
                field,
                from,
                to,
            } => {
                write!(
                    f,
                    "/{}: calibration {} from {:.4} to {:.4}",
                    sensor, field, from, to
                )
            }
            Response::CalibrationUnchanged { sensor } => {
                write!(f, "/{}: calibration values unchanged", sensor)
            }
            Response::CalibrationEnded { sensor } => write!(f, "/{} calibrate end", sensor),
            Response::Usage { sensor, text } => write!(f, "/{} usage: {}", sensor, text),
            Response::Error(err) => write!(f, "/err: {}", err),
        }
    }
}
