//! Console command definitions.
//!
//! A [`Command`] is the leaf reached by walking the dispatch tree in
//! `console::parser`; it borrows any free text from the framed line.

use core::fmt::{self, Write};

use super::types::SensorKind;
use crate::console::tokenizer::Tokenizer;

/// Represents a fully parsed console command.
///
/// Note: The `Display` implementation renders the canonical command text
/// (e.g. `ph calibrate set 2.5000 2.0000`), without the leading `/`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command<'a> {
    /// `flush` - drain the pending output buffer. No response.
    Flush,

    /// `echo [text]` - repeat text back to the operator.
    Echo(EchoPayload<'a>),

    /// `<sensor>` - take a reading.
    Read(SensorKind),

    /// `<sensor> calibrate <mode> ...`
    Calibrate {
        sensor: SensorKind,
        mode: CalibrateMode,
    },

    /// `<sensor> help` - print the usage block.
    Help(SensorKind),
}

/// Third-level branch under `<sensor> calibrate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrateMode {
    /// Run the driver's interactive calibration routine.
    Start,
    /// Report the stored calibration.
    Get,
    /// Store a calibration from two values given in field order.
    Set { first: f32, second: f32 },
}

/// Text carried by an `echo` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoPayload<'a> {
    /// Raw remainder of the line after the keyword, reproduced byte for byte.
    /// Used when the remainder holds no tokens.
    Verbatim(&'a [u8]),
    /// Remainder holding at least one token; re-emitted as its tokens joined
    /// by single spaces, each truncated like any other token.
    Words(&'a [u8]),
}

// Console input is ASCII; anything else is shown as '?'
fn write_ascii(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for &byte in bytes {
        f.write_char(if byte.is_ascii() { byte as char } else { '?' })?;
    }
    Ok(())
}

impl fmt::Display for EchoPayload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            EchoPayload::Verbatim(bytes) => write_ascii(f, bytes),
            EchoPayload::Words(bytes) => {
                for (i, token) in Tokenizer::new(bytes).enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write_ascii(f, token.as_bytes())?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Flush => f.write_str("flush"),
            Command::Echo(payload) => write!(f, "echo {}", payload),
            Command::Read(sensor) => write!(f, "{}", sensor),
            Command::Help(sensor) => write!(f, "{} help", sensor),
            Command::Calibrate { sensor, mode } => match mode {
                CalibrateMode::Start => write!(f, "{} calibrate start", sensor),
                CalibrateMode::Get => write!(f, "{} calibrate get", sensor),
                CalibrateMode::Set { first, second } => {
                    write!(f, "{} calibrate set {:.4} {:.4}", sensor, first, second)
                }
            },
        }
    }
}

impl Command<'_> {
    /// The sensor namespace the command is directed to, if any.
    pub fn sensor(&self) -> Option<SensorKind> {
        match self {
            Command::Flush | Command::Echo(_) => None,
            Command::Read(sensor) | Command::Help(sensor) => Some(*sensor),
            Command::Calibrate { sensor, .. } => Some(*sensor),
        }
    }

    /// Whether executing the command may change a calibration record.
    pub fn mutates_calibration(&self) -> bool {
        matches!(
            self,
            Command::Calibrate {
                mode: CalibrateMode::Start | CalibrateMode::Set { .. },
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_formatting() {
        assert_eq!(Command::Flush.to_string(), "flush");
        assert_eq!(Command::Read(SensorKind::Turbidity).to_string(), "turb");
        assert_eq!(
            Command::Help(SensorKind::Turbidity).to_string(),
            "turb help"
        );
        assert_eq!(
            Command::Calibrate {
                sensor: SensorKind::Ph,
                mode: CalibrateMode::Start,
            }
            .to_string(),
            "ph calibrate start"
        );
        assert_eq!(
            Command::Calibrate {
                sensor: SensorKind::Ph,
                mode: CalibrateMode::Set {
                    first: 2.5,
                    second: 2.0,
                },
            }
            .to_string(),
            "ph calibrate set 2.5000 2.0000"
        );
        assert_eq!(
            Command::Echo(EchoPayload::Words(b"hello   world ")).to_string(),
            "echo hello world"
        );
    }

    #[test]
    fn test_echo_payload_rendering() {
        assert_eq!(EchoPayload::Verbatim(b"").to_string(), "");
        assert_eq!(EchoPayload::Verbatim(b"  ").to_string(), "  ");
        assert_eq!(EchoPayload::Words(b" a  b\r c").to_string(), "a b c");
        assert_eq!(EchoPayload::Verbatim(&[b'x', 0xC3]).to_string(), "x?");
    }

    #[test]
    fn test_echo_words_follow_token_rules() {
        // Each word is cut at the token limit, exactly as the tokenizer does
        let mut line = [b'w'; 40].to_vec();
        line.extend_from_slice(b"  tail");
        let rendered = EchoPayload::Words(&line).to_string();
        let expected: std::string::String = Tokenizer::new(&line)
            .map(|t| t.as_str().unwrap())
            .collect::<std::vec::Vec<_>>()
            .join(" ");
        assert_eq!(rendered, expected);
        assert_eq!(rendered, format!("{} tail", "w".repeat(32)));
    }

    #[test]
    fn test_sensor_and_mutation() {
        assert_eq!(Command::Flush.sensor(), None);
        assert_eq!(Command::Read(SensorKind::Ec).sensor(), Some(SensorKind::Ec));
        assert!(!Command::Read(SensorKind::Ec).mutates_calibration());

        let get = Command::Calibrate {
            sensor: SensorKind::Ec,
            mode: CalibrateMode::Get,
        };
        assert_eq!(get.sensor(), Some(SensorKind::Ec));
        assert!(!get.mutates_calibration());

        let set = Command::Calibrate {
            sensor: SensorKind::Ec,
            mode: CalibrateMode::Set {
                first: 1.0,
                second: 2.0,
            },
        };
        assert!(set.mutates_calibration());
    }
}
