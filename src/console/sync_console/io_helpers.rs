// src/console/sync_console/io_helpers.rs

use super::{FramedLine, SyncConsole};
use crate::common::{
    error::ConsoleError,
    frame::{is_line_terminator, COMMAND_SENTINEL},
    hal_traits::{ConsoleSerial, ConsoleTimer},
    timing,
};
use crate::console::{
    formatter::{format_response, RESPONSE_CAPACITY},
    response::Response,
};
use core::fmt::Debug;
use core::time::Duration;
use nb::Result as NbResult;

impl<IF, PH, EC, TB> SyncConsole<IF, PH, EC, TB>
where
    IF: ConsoleSerial + ConsoleTimer,
    IF::Error: Debug,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<T, ConsoleError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let deadline = self.interface.now() + timeout;

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(ConsoleError::Timeout);
                    }
                    self.interface
                        .delay_us(timing::POLL_INTERVAL.as_micros() as u32);
                }
                Err(nb::Error::Other(e)) => return Err(ConsoleError::Io(e)),
            }
        }
    }

    /// Frames one command line into the command context.
    ///
    /// Returns [`FramedLine::Idle`] without waiting unless the first byte is
    /// the `/` sentinel. After that each byte gets the configured inactivity
    /// timeout; expiry ends the line just like CR or LF does. The terminator
    /// itself is consumed but never stored.
    pub(super) fn read_command_line(&mut self) -> Result<FramedLine, ConsoleError<IF::Error>> {
        match self.interface.read_byte() {
            Ok(COMMAND_SENTINEL) => {}
            Ok(_) | Err(nb::Error::WouldBlock) => return Ok(FramedLine::Idle),
            Err(nb::Error::Other(e)) => return Err(ConsoleError::Io(e)),
        }

        self.context.clear();
        let timeout = self.config.inactivity_timeout;

        loop {
            match self.execute_blocking_io_with_timeout(timeout, |iface| iface.read_byte()) {
                Ok(byte) if is_line_terminator(byte) => return Ok(FramedLine::Complete),
                Ok(byte) => {
                    if self.context.push(byte).is_err() {
                        self.context.clear();
                        return Ok(FramedLine::Overflow);
                    }
                }
                Err(ConsoleError::Timeout) => {
                    let len = self.context.len();
                    log::debug!("line closed by inactivity after {} bytes", len);
                    return Ok(FramedLine::Complete);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Formats `response` and writes it out, CR/LF included.
    pub(super) fn respond(
        &mut self,
        response: &Response<'_>,
    ) -> Result<(), ConsoleError<IF::Error>> {
        let line = format_response(response).map_err(|_| {
            log::warn!("response exceeds {} bytes, dropped", RESPONSE_CAPACITY);
            ConsoleError::ResponseTooLong {
                capacity: RESPONSE_CAPACITY,
            }
        })?;

        let write_timeout = timing::BYTE_DURATION * line.len() as u32 + timing::WRITE_MARGIN;
        for &byte in line.as_bytes() {
            self.execute_blocking_io_with_timeout(write_timeout, |iface| iface.write_byte(byte))
                .inspect_err(|_| log::warn!("response write stalled"))?;
        }
        Ok(())
    }

    /// Drains the transmit buffer.
    pub(super) fn flush_output(&mut self) -> Result<(), ConsoleError<IF::Error>> {
        self.execute_blocking_io_with_timeout(timing::FLUSH_TIMEOUT, |iface| iface.flush())
    }
}
