// src/console/sync_console/mock.rs

//! Scripted serial port, clock and sensors for driving the console in tests.

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use super::SyncConsole;
use crate::common::{
    config::ConsoleConfig,
    hal_traits::{ConsoleSerial, ConsoleTimer, TickInstant},
    types::{CalibrationRecord, EcCalibration, PhCalibration, TurbidityCalibration},
};
use crate::console::handler::{CalibratedProbe, Sensors, TurbiditySensor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockCommError;

/// A serial port whose input bytes become readable at scripted times.
///
/// Time only moves when the console delays, so timeouts are deterministic.
#[derive(Debug, Default)]
pub(crate) struct MockInterface {
    pub now_us: u64,
    pub inbound: VecDeque<(u64, u8)>,
    pub outbound: Vec<u8>,
    pub flushes: usize,
    pub fail_reads: bool,
    pub stall_writes: bool,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues bytes that are readable right away.
    pub fn send(&mut self, bytes: &[u8]) {
        let now = self.now_us;
        self.send_at(now, bytes);
    }

    /// Queues bytes that become readable at `at_us`.
    pub fn send_at(&mut self, at_us: u64, bytes: &[u8]) {
        self.inbound.extend(bytes.iter().map(|&b| (at_us, b)));
    }

    pub fn pending(&self) -> usize {
        self.inbound.len()
    }

    pub fn take_output(&mut self) -> String {
        let bytes = core::mem::take(&mut self.outbound);
        String::from_utf8(bytes).expect("console wrote non-UTF-8 output")
    }
}

impl ConsoleTimer for MockInterface {
    type Instant = TickInstant;

    fn delay_us(&mut self, us: u32) {
        self.now_us += us as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_us += ms as u64 * 1_000;
    }

    fn now(&self) -> TickInstant {
        TickInstant(self.now_us)
    }
}

impl ConsoleSerial for MockInterface {
    type Error = MockCommError;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        if self.fail_reads {
            return Err(nb::Error::Other(MockCommError));
        }
        match self.inbound.front() {
            Some(&(at_us, byte)) if at_us <= self.now_us => {
                self.inbound.pop_front();
                Ok(byte)
            }
            _ => Err(nb::Error::WouldBlock),
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if self.stall_writes {
            return Err(nb::Error::WouldBlock);
        }
        self.outbound.push(byte);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

/// A probe with a fixed reading. `calibrate` installs `calibrate_to`, if set.
#[derive(Debug, Default)]
pub(crate) struct MockProbe<C> {
    pub value: f32,
    pub calibration: C,
    pub calibrate_to: Option<C>,
    pub reads: usize,
    pub set_calls: usize,
    pub calibrate_calls: usize,
}

impl<C: CalibrationRecord> CalibratedProbe for MockProbe<C> {
    type Calibration = C;

    fn read(&mut self) -> f32 {
        self.reads += 1;
        self.value
    }

    fn calibration(&self) -> C {
        self.calibration
    }

    fn set_calibration(&mut self, calibration: C) {
        self.set_calls += 1;
        self.calibration = calibration;
    }

    fn calibrate(&mut self) {
        self.calibrate_calls += 1;
        if let Some(next) = self.calibrate_to {
            self.calibration = next;
        }
    }
}

/// Hands out queued raw samples, then zeros.
#[derive(Debug, Default)]
pub(crate) struct MockTurbidity {
    pub samples: VecDeque<u16>,
    pub calibration: TurbidityCalibration,
}

impl TurbiditySensor for MockTurbidity {
    fn read_raw(&mut self) -> u16 {
        self.samples.pop_front().unwrap_or(0)
    }

    fn calibration(&self) -> TurbidityCalibration {
        self.calibration
    }

    fn set_calibration(&mut self, calibration: TurbidityCalibration) {
        self.calibration = calibration;
    }
}

pub(crate) type MockConsole =
    SyncConsole<MockInterface, MockProbe<PhCalibration>, MockProbe<EcCalibration>, MockTurbidity>;

pub(crate) fn mock_console() -> MockConsole {
    mock_console_with(ConsoleConfig::default())
}

pub(crate) fn mock_console_with(config: ConsoleConfig) -> MockConsole {
    let sensors = Sensors::new(
        MockProbe::default(),
        MockProbe::default(),
        MockTurbidity::default(),
    );
    SyncConsole::with_config(MockInterface::new(), sensors, config)
}

/// Sends `input`, polls until every byte is consumed and returns the output.
pub(crate) fn run_line(console: &mut MockConsole, input: &[u8]) -> String {
    console.interface_mut().send(input);
    while console.interface().pending() > 0 {
        console.poll().expect("mock transport failed");
    }
    console.interface_mut().take_output()
}
