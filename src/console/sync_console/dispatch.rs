// src/console/sync_console/dispatch.rs

use super::SyncConsole;
use crate::common::{
    command::{CalibrateMode, Command},
    error::{CommandError, ConsoleError},
    hal_traits::{ConsoleSerial, ConsoleTimer},
    types::{
        median_of, CalibrationChange, CalibrationRecord, CalibrationTransition, EcCalibration,
        PhCalibration, SensorKind, TurbidityCalibration, TURBIDITY_SAMPLE_COUNT,
    },
};
use crate::console::{
    handler::{CalibratedProbe, Sensors, TurbiditySensor},
    response::{Response, TURBIDITY_USAGE},
};
use core::fmt::Debug;

impl<IF, PH, EC, TB> SyncConsole<IF, PH, EC, TB>
where
    IF: ConsoleSerial + ConsoleTimer,
    IF::Error: Debug,
    PH: CalibratedProbe<Calibration = PhCalibration>,
    EC: CalibratedProbe<Calibration = EcCalibration>,
    TB: TurbiditySensor,
{
    /// Runs a parsed command and writes all of its response lines.
    ///
    /// Combinations the parser never produces (e.g. `ph help`) are answered
    /// with `Invalid command`.
    pub(super) fn execute(&mut self, command: &Command<'_>) -> Result<(), ConsoleError<IF::Error>> {
        match *command {
            Command::Flush => self.flush_output(),
            Command::Echo(payload) => self.respond(&Response::Echo(payload)),
            Command::Read(sensor) => {
                let value = self.read_sensor(sensor);
                self.respond(&Response::Reading { sensor, value })
            }
            Command::Help(SensorKind::Turbidity) => {
                for text in TURBIDITY_USAGE {
                    self.respond(&Response::Usage {
                        sensor: SensorKind::Turbidity,
                        text,
                    })?;
                }
                Ok(())
            }
            Command::Calibrate {
                sensor: SensorKind::Ph,
                mode: CalibrateMode::Start,
            } => self.run_probe_calibration(SensorKind::Ph, |s| &mut s.ph, true),
            Command::Calibrate {
                sensor: SensorKind::Ec,
                mode: CalibrateMode::Start,
            } => {
                let report = self.config.report_ec_calibration_changes;
                self.run_probe_calibration(SensorKind::Ec, |s| &mut s.ec, report)
            }
            Command::Calibrate {
                sensor,
                mode: CalibrateMode::Get,
            } => {
                let (first, second) = self.calibration_pair(sensor);
                self.respond(&Response::CalibrationData {
                    sensor,
                    first,
                    second,
                })
            }
            Command::Calibrate {
                sensor,
                mode: CalibrateMode::Set { first, second },
            } => {
                self.store_calibration(sensor, first, second);
                self.respond(&Response::CalibrationStored { sensor })
            }
            _ => self.respond(&Response::Error(CommandError::InvalidCommand)),
        }
    }

    fn read_sensor(&mut self, sensor: SensorKind) -> f32 {
        match sensor {
            SensorKind::Ph => self.sensors.ph.read(),
            SensorKind::Ec => self.sensors.ec.read(),
            SensorKind::Turbidity => self.read_turbidity(),
        }
    }

    /// Median of [`TURBIDITY_SAMPLE_COUNT`] raw samples, then the linear map.
    fn read_turbidity(&mut self) -> f32 {
        let delay_ms = self.config.turbidity_sample_delay.as_millis() as u32;
        let mut samples = [0u16; TURBIDITY_SAMPLE_COUNT];
        for (i, slot) in samples.iter_mut().enumerate() {
            if i > 0 {
                self.interface.delay_ms(delay_ms);
            }
            *slot = self.sensors.turbidity.read_raw();
        }

        let median = median_of(&mut samples);
        log::trace!("turbidity samples {:?}, median {}", samples, median);
        self.sensors.turbidity.calibration().apply(median)
    }

    fn calibration_pair(&self, sensor: SensorKind) -> (f32, f32) {
        match sensor {
            SensorKind::Ph => self.sensors.ph.calibration().pair(),
            SensorKind::Ec => self.sensors.ec.calibration().pair(),
            SensorKind::Turbidity => self.sensors.turbidity.calibration().pair(),
        }
    }

    fn store_calibration(&mut self, sensor: SensorKind, first: f32, second: f32) {
        match sensor {
            SensorKind::Ph => {
                let calibration = PhCalibration::from_pair(first, second);
                self.sensors.ph.set_calibration(calibration);
            }
            SensorKind::Ec => {
                if second < first {
                    log::debug!("ec endpoints reversed, storing {} {}", second, first);
                }
                self.sensors.ec.set_calibration(EcCalibration::new(first, second));
            }
            SensorKind::Turbidity => {
                let calibration = TurbidityCalibration::from_pair(first, second);
                self.sensors.turbidity.set_calibration(calibration);
            }
        }
        log::info!("{} calibration stored", sensor);
    }

    /// Brackets a blocking calibration run with start/end markers and
    /// reports what it changed in between.
    fn run_probe_calibration<P>(
        &mut self,
        sensor: SensorKind,
        select: fn(&mut Sensors<PH, EC, TB>) -> &mut P,
        report_changes: bool,
    ) -> Result<(), ConsoleError<IF::Error>>
    where
        P: CalibratedProbe,
    {
        self.respond(&Response::CalibrationStarted { sensor })?;
        log::info!("{} calibration started", sensor);

        let probe = select(&mut self.sensors);
        let before = probe.calibration();
        probe.calibrate();
        let transition = CalibrationTransition::new(before, probe.calibration());

        match transition.change() {
            CalibrationChange::Changed { field, from, to } => {
                log::info!("{} calibration: {} {} -> {}", sensor, field, from, to);
                if report_changes {
                    self.respond(&Response::CalibrationChanged {
                        sensor,
                        field,
                        from,
                        to,
                    })?;
                }
            }
            CalibrationChange::Unchanged => {
                log::info!("{} calibration finished, values unchanged", sensor);
                self.respond(&Response::CalibrationUnchanged { sensor })?;
            }
        }

        // Both probes close with `calibrate end`, mirroring the start marker
        self.respond(&Response::CalibrationEnded { sensor })
    }
}
