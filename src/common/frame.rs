// src/common/frame.rs

/// Byte that must lead a command before anything is buffered.
pub const COMMAND_SENTINEL: u8 = b'/';

/// Size of the command line buffer, one byte of which is reserved for a terminator.
pub const LINE_BUFFER_SIZE: usize = 64;

/// Longest command body accepted after the sentinel.
pub const MAX_COMMAND_LEN: usize = LINE_BUFFER_SIZE - 1;

/// Tokens longer than this are silently truncated.
pub const MAX_TOKEN_LEN: usize = 32;

/// Bytes that end a command line while it is being framed.
#[inline]
pub const fn is_line_terminator(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n')
}

/// Bytes that separate tokens within a framed line.
#[inline]
pub const fn is_token_delimiter(byte: u8) -> bool {
    matches!(byte, b' ' | b'\r' | b'\n')
}
