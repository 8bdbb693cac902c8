// src/common/timing.rs

use core::time::Duration;

// === Input Framing ===

/// Idle time after the last received byte that ends a command line
/// when no CR/LF arrives.
pub const INPUT_INACTIVITY_TIMEOUT: Duration = Duration::from_millis(1000);

/// Delay between successive non-blocking polls while waiting on the port.
pub const POLL_INTERVAL: Duration = Duration::from_micros(100);

// === Turbidity Sampling ===

/// Wait between consecutive raw turbidity samples.
pub const TURBIDITY_SAMPLE_DELAY: Duration = Duration::from_millis(20);

// === Byte Timing at 9600 Baud (8N1) ===
// 1 start bit + 8 data bits + 1 stop bit = 10 bits per byte
// Time per byte = 10 / 9600 s = 1.0416... ms

/// Nominal duration of a single byte at 9600 baud (8N1 format).
pub const BYTE_DURATION: Duration = Duration::from_micros(1042);

/// Slack added on top of the nominal transmit time of a response line.
pub const WRITE_MARGIN: Duration = Duration::from_millis(20);

/// Upper bound for draining the transmit buffer on `flush`.
pub const FLUSH_TIMEOUT: Duration = Duration::from_millis(200);
