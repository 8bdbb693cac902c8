// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A point on the console's monotonic clock.
pub trait ConsoleInstant:
    Copy + PartialOrd + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> ConsoleInstant for T where
    T: Copy + PartialOrd + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for timer/delay operations required by the console.
pub trait ConsoleTimer {
    /// Instant type returned by [`ConsoleTimer::now`].
    type Instant: ConsoleInstant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Current time. Must never go backwards.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for synchronous (non-blocking) console serial communication.
pub trait ConsoleSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as
    /// `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Ok(())` if the byte was accepted for transmission, or `Err(nb::Error::WouldBlock)`
    /// if the write buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes have been sent.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}

/// Microsecond tick count since an arbitrary epoch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TickInstant(pub u64);

impl TickInstant {
    pub const fn as_micros(&self) -> u64 {
        self.0
    }
}

impl Add<Duration> for TickInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        TickInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl Sub<TickInstant> for TickInstant {
    type Output = Duration;
    fn sub(self, rhs: TickInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

/// Bundles a console serial port with an `embedded-hal` delay provider.
///
/// Targets without a free-running timer get a clock for free: `now()` is the
/// sum of every delay issued through this wrapper. Since the console only
/// waits by polling with short delays, that sum tracks real time closely
/// enough for the one second inactivity timeout.
#[cfg(feature = "impl-native")]
pub struct NativeInterface<S, D> {
    serial: S,
    delay: D,
    elapsed: TickInstant,
}

#[cfg(feature = "impl-native")]
impl<S, D> NativeInterface<S, D>
where
    S: ConsoleSerial,
    D: embedded_hal::delay::DelayNs,
{
    pub fn new(serial: S, delay: D) -> Self {
        NativeInterface {
            serial,
            delay,
            elapsed: TickInstant::default(),
        }
    }

    /// Returns the wrapped serial port and delay provider.
    pub fn release(self) -> (S, D) {
        (self.serial, self.delay)
    }
}

#[cfg(feature = "impl-native")]
impl<S, D> ConsoleTimer for NativeInterface<S, D>
where
    D: embedded_hal::delay::DelayNs,
{
    type Instant = TickInstant;

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
        self.elapsed = self.elapsed + Duration::from_micros(us as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
        self.elapsed = self.elapsed + Duration::from_millis(ms as u64);
    }

    fn now(&self) -> TickInstant {
        self.elapsed
    }
}

#[cfg(feature = "impl-native")]
impl<S, D> ConsoleSerial for NativeInterface<S, D>
where
    S: ConsoleSerial,
{
    type Error = S::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.serial.read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        self.serial.write_byte(byte)
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.serial.flush()
    }
}
