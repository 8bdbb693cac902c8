// src/console/parser.rs

use crate::common::{
    command::{CalibrateMode, Command, EchoPayload},
    error::CommandError,
    types::SensorKind,
};

use super::tokenizer::{Token, Tokenizer};

// --- Dispatch Tree ---
//
// Each level is a table from keyword to node. Walking the tree consumes one
// token per level and never backtracks once a keyword has matched.

/// Nodes reachable from the first token of a line.
#[derive(Debug, Copy, Clone)]
enum RootNode {
    Flush,
    Echo,
    Sensor(SensorKind),
}

const ROOT_COMMANDS: &[(&str, RootNode)] = &[
    ("flush", RootNode::Flush),
    ("echo", RootNode::Echo),
    ("ph", RootNode::Sensor(SensorKind::Ph)),
    ("ec", RootNode::Sensor(SensorKind::Ec)),
    ("turb", RootNode::Sensor(SensorKind::Turbidity)),
];

/// Nodes below a sensor keyword.
#[derive(Debug, Copy, Clone)]
enum SensorNode {
    Calibrate,
    Help,
}

const PROBE_SUBCOMMANDS: &[(&str, SensorNode)] = &[("calibrate", SensorNode::Calibrate)];
const TURBIDITY_SUBCOMMANDS: &[(&str, SensorNode)] =
    &[("calibrate", SensorNode::Calibrate), ("help", SensorNode::Help)];

/// Leaves below `<sensor> calibrate`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ModeNode {
    Start,
    Get,
    Set,
}

impl ModeNode {
    /// Number of numeric arguments the leaf consumes.
    const fn arity(self) -> usize {
        match self {
            ModeNode::Start | ModeNode::Get => 0,
            ModeNode::Set => 2,
        }
    }
}

const PROBE_MODES: &[(&str, ModeNode)] = &[
    ("start", ModeNode::Start),
    ("get", ModeNode::Get),
    ("set", ModeNode::Set),
];
const TURBIDITY_MODES: &[(&str, ModeNode)] = &[("get", ModeNode::Get), ("set", ModeNode::Set)];

fn subcommands(sensor: SensorKind) -> &'static [(&'static str, SensorNode)] {
    match sensor {
        SensorKind::Ph | SensorKind::Ec => PROBE_SUBCOMMANDS,
        SensorKind::Turbidity => TURBIDITY_SUBCOMMANDS,
    }
}

fn calibrate_modes(sensor: SensorKind) -> &'static [(&'static str, ModeNode)] {
    match sensor {
        SensorKind::Ph | SensorKind::Ec => PROBE_MODES,
        SensorKind::Turbidity => TURBIDITY_MODES,
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], token: Token<'_>) -> Option<T> {
    table
        .iter()
        .find(|(keyword, _)| token.is(keyword))
        .map(|(_, node)| *node)
}

// --- Parsing ---

/// Parses a framed command line (without the leading `/`) into a [`Command`].
///
/// Tokens left over once a leaf has been reached are ignored.
///
/// # Errors
///
/// Returns the [`CommandError`] to report when the line names no known
/// command, a sub-command is unknown, or a required argument is missing.
pub fn parse_command(line: &[u8]) -> Result<Command<'_>, CommandError> {
    let mut tokens = Tokenizer::new(line);

    let first = tokens.next_token().ok_or(CommandError::InvalidCommand)?;
    match lookup(ROOT_COMMANDS, first).ok_or(CommandError::InvalidCommand)? {
        RootNode::Flush => Ok(Command::Flush),
        RootNode::Echo => Ok(Command::Echo(parse_echo(&mut tokens))),
        RootNode::Sensor(sensor) => parse_sensor_command(sensor, &mut tokens),
    }
}

fn parse_echo<'a>(tokens: &mut Tokenizer<'a>) -> EchoPayload<'a> {
    let rest = tokens.remainder();
    match tokens.next_token() {
        None => EchoPayload::Verbatim(rest),
        Some(_) => EchoPayload::Words(rest),
    }
}

fn parse_sensor_command<'a>(
    sensor: SensorKind,
    tokens: &mut Tokenizer<'a>,
) -> Result<Command<'a>, CommandError> {
    let Some(token) = tokens.next_token() else {
        return Ok(Command::Read(sensor));
    };

    match lookup(subcommands(sensor), token).ok_or(CommandError::InvalidCommand)? {
        SensorNode::Help => Ok(Command::Help(sensor)),
        SensorNode::Calibrate => {
            let mode_token = tokens
                .next_token()
                .ok_or(CommandError::MissingMode { sensor })?;
            let node = lookup(calibrate_modes(sensor), mode_token)
                .ok_or(CommandError::InvalidCommand)?;
            let mode = parse_mode(sensor, node, tokens)?;
            Ok(Command::Calibrate { sensor, mode })
        }
    }
}

fn parse_mode(
    sensor: SensorKind,
    node: ModeNode,
    tokens: &mut Tokenizer<'_>,
) -> Result<CalibrateMode, CommandError> {
    let labels = sensor.set_arguments();
    let mut values = [0.0f32; 2];
    for (slot, argument) in values.iter_mut().zip(labels).take(node.arity()) {
        let token = tokens
            .next_token()
            .ok_or(CommandError::MissingArgument { sensor, argument })?;
        *slot = token
            .parse_f32()
            .ok_or(CommandError::InvalidNumber { sensor, argument })?;
    }

    Ok(match node {
        ModeNode::Start => CalibrateMode::Start,
        ModeNode::Get => CalibrateMode::Get,
        ModeNode::Set => CalibrateMode::Set {
            first: values[0],
            second: values[1],
        },
    })
}
