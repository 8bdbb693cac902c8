// src/console/formatter.rs

use arrayvec::ArrayString;
use core::fmt::Write;

use super::response::Response;

/// Room for the longest response line, CR/LF included.
pub(crate) const RESPONSE_CAPACITY: usize = 160;

pub(crate) type ResponseBuffer = ArrayString<RESPONSE_CAPACITY>;

/// The rendered line did not fit in [`RESPONSE_CAPACITY`] bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ResponseOverflow;

/// Renders a response as one CR/LF-terminated line.
pub(crate) fn format_response(response: &Response<'_>) -> Result<ResponseBuffer, ResponseOverflow> {
    let mut buffer = ResponseBuffer::new();
    write!(buffer, "{}\r\n", response).map_err(|_| ResponseOverflow)?;
    Ok(buffer)
}
