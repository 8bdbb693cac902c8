// src/console/context.rs

use heapless::Vec;

use crate::common::frame::MAX_COMMAND_LEN;

use super::tokenizer::Tokenizer;

/// The one command line buffer the console owns.
///
/// Allocated once with the console, cleared and refilled for every command,
/// never grown. Only the body after the `/` sentinel is stored; line
/// terminators are never stored.
#[derive(Debug, Default, Clone)]
pub struct CommandContext {
    line: Vec<u8, MAX_COMMAND_LEN>,
}

/// The buffer is full; the byte was not stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LineFull;

impl CommandContext {
    pub const fn new() -> Self {
        Self { line: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.line.clear();
    }

    /// Appends one byte of the command body.
    pub fn push(&mut self, byte: u8) -> Result<(), LineFull> {
        self.line.push(byte).map_err(|_| LineFull)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.line
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Starts a fresh token scan at the beginning of the line.
    pub fn tokens(&self) -> Tokenizer<'_> {
        Tokenizer::new(&self.line)
    }
}
