// src/console/handler.rs

//! Sensor driver contracts.
//!
//! Analog-to-voltage conversion, wiring and the interactive calibration
//! procedure live in the drivers. The console only reads values and moves
//! calibration records in and out through these traits; each record stays
//! owned by its driver.
//!
//! Water temperature never reaches the console: the EC driver reads its own
//! temperature source for compensation.

use crate::common::types::{CalibrationRecord, EcCalibration, PhCalibration, TurbidityCalibration};

/// A probe calibrated against two reference points (pH, EC).
pub trait CalibratedProbe {
    type Calibration: CalibrationRecord;

    /// Instantaneous measurement in physical units.
    fn read(&mut self) -> f32;

    /// Current calibration record.
    fn calibration(&self) -> Self::Calibration;

    /// Replaces the calibration record.
    fn set_calibration(&mut self, calibration: Self::Calibration);

    /// Runs the interactive calibration routine.
    ///
    /// Blocks until the physical procedure has finished. Nothing else is
    /// serviced meanwhile and there is no way to cancel it.
    fn calibrate(&mut self);
}

/// Turbidity front end. The console does the median filtering itself, so
/// the driver exposes raw analog samples.
pub trait TurbiditySensor {
    /// One raw analog sample.
    fn read_raw(&mut self) -> u16;

    fn calibration(&self) -> TurbidityCalibration;

    fn set_calibration(&mut self, calibration: TurbidityCalibration);
}

/// Every sensor the console can address.
#[derive(Debug)]
pub struct Sensors<PH, EC, TB> {
    pub ph: PH,
    pub ec: EC,
    pub turbidity: TB,
}

impl<PH, EC, TB> Sensors<PH, EC, TB>
where
    PH: CalibratedProbe<Calibration = PhCalibration>,
    EC: CalibratedProbe<Calibration = EcCalibration>,
    TB: TurbiditySensor,
{
    pub fn new(ph: PH, ec: EC, turbidity: TB) -> Self {
        Sensors { ph, ec, turbidity }
    }
}
