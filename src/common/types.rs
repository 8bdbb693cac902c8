// src/common/types.rs

use core::fmt;

// --- Sensor Namespaces ---

/// The sensors reachable from the console. Each one owns a command
/// namespace, which is also the prefix of its response lines.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SensorKind {
    Ph,
    Ec,
    Turbidity,
}

impl SensorKind {
    /// Command keyword and response prefix (`ph`, `ec`, `turb`).
    pub const fn namespace(&self) -> &'static str {
        match self {
            SensorKind::Ph => "ph",
            SensorKind::Ec => "ec",
            SensorKind::Turbidity => "turb",
        }
    }

    /// Operator-facing names of the two `calibrate set` values, in input order.
    pub const fn set_arguments(&self) -> [&'static str; 2] {
        match self {
            SensorKind::Ph => ["neutral voltage", "acid voltage"],
            SensorKind::Ec => ["low value", "high value"],
            SensorKind::Turbidity => ["slope", "intercept"],
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace())
    }
}

// --- Calibration Records ---

/// A two-field calibration record owned by a sensor driver.
///
/// Field order is significant: it is the order of `calibrate set` arguments,
/// of `calibrate get` output, and the priority order when reporting which
/// field a calibration run changed.
pub trait CalibrationRecord: Copy + PartialEq + fmt::Debug {
    /// Short field names used in change reports (`neutral`, `acid`, ...).
    const FIELD_NAMES: [&'static str; 2];

    /// Builds a record from values given in field order.
    fn from_pair(first: f32, second: f32) -> Self;

    /// Returns the values in field order.
    fn pair(&self) -> (f32, f32);
}

/// pH probe reference voltages (mV) for the neutral (pH 7) and acid (pH 4) buffers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhCalibration {
    pub neutral_voltage: f32,
    pub acid_voltage: f32,
}

impl PhCalibration {
    pub const fn new(neutral_voltage: f32, acid_voltage: f32) -> Self {
        Self {
            neutral_voltage,
            acid_voltage,
        }
    }
}

impl Default for PhCalibration {
    fn default() -> Self {
        Self::new(1500.0, 2032.44)
    }
}

impl CalibrationRecord for PhCalibration {
    const FIELD_NAMES: [&'static str; 2] = ["neutral", "acid"];

    // Neutral and acid are independent reference points, not a range: no reordering.
    fn from_pair(first: f32, second: f32) -> Self {
        Self::new(first, second)
    }

    fn pair(&self) -> (f32, f32) {
        (self.neutral_voltage, self.acid_voltage)
    }
}

/// Conductivity probe endpoints. Always satisfies `low <= high`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EcCalibration {
    low: f32,
    high: f32,
}

impl EcCalibration {
    /// Creates a calibration, swapping the endpoints if given in descending order.
    pub fn new(low: f32, high: f32) -> Self {
        if high < low {
            Self {
                low: high,
                high: low,
            }
        } else {
            Self { low, high }
        }
    }

    pub const fn low(&self) -> f32 {
        self.low
    }

    pub const fn high(&self) -> f32 {
        self.high
    }
}

impl Default for EcCalibration {
    fn default() -> Self {
        Self {
            low: 1.0,
            high: 1.0,
        }
    }
}

impl CalibrationRecord for EcCalibration {
    const FIELD_NAMES: [&'static str; 2] = ["low", "high"];

    fn from_pair(first: f32, second: f32) -> Self {
        Self::new(first, second)
    }

    fn pair(&self) -> (f32, f32) {
        (self.low, self.high)
    }
}

/// Linear transform applied to the median raw turbidity sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TurbidityCalibration {
    pub slope: f32,
    pub intercept: f32,
}

impl TurbidityCalibration {
    pub const fn new(slope: f32, intercept: f32) -> Self {
        Self { slope, intercept }
    }

    /// `slope * raw + intercept`
    #[inline]
    pub fn apply(&self, raw: u16) -> f32 {
        self.slope * raw as f32 + self.intercept
    }
}

impl Default for TurbidityCalibration {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl CalibrationRecord for TurbidityCalibration {
    const FIELD_NAMES: [&'static str; 2] = ["slope", "intercept"];

    fn from_pair(first: f32, second: f32) -> Self {
        Self::new(first, second)
    }

    fn pair(&self) -> (f32, f32) {
        (self.slope, self.intercept)
    }
}

// --- Calibration Transitions ---

/// Calibration snapshots taken around one interactive calibration run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CalibrationTransition<C> {
    pub before: C,
    pub after: C,
}

/// What a calibration run did, as far as the operator is told.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CalibrationChange {
    /// The highest-priority field that differs.
    Changed {
        field: &'static str,
        from: f32,
        to: f32,
    },
    /// Both fields compare equal. A valid outcome, not an error.
    Unchanged,
}

impl<C: CalibrationRecord> CalibrationTransition<C> {
    pub fn new(before: C, after: C) -> Self {
        Self { before, after }
    }

    /// Compares field by field in priority order (first, then second).
    /// Only one field is ever reported.
    pub fn change(&self) -> CalibrationChange {
        let (old_first, old_second) = self.before.pair();
        let (new_first, new_second) = self.after.pair();

        if old_first != new_first {
            CalibrationChange::Changed {
                field: C::FIELD_NAMES[0],
                from: old_first,
                to: new_first,
            }
        } else if old_second != new_second {
            CalibrationChange::Changed {
                field: C::FIELD_NAMES[1],
                from: old_second,
                to: new_second,
            }
        } else {
            CalibrationChange::Unchanged
        }
    }
}

// --- Median Filtering ---

/// Number of raw samples taken per turbidity reading.
pub const TURBIDITY_SAMPLE_COUNT: usize = 5;

/// Sorts `samples` in place and returns the middle element.
pub fn median_of<const N: usize>(samples: &mut [u16; N]) -> u16 {
    samples.sort_unstable();
    samples[N / 2]
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces() {
        assert_eq!(SensorKind::Ph.to_string(), "ph");
        assert_eq!(SensorKind::Ec.to_string(), "ec");
        assert_eq!(SensorKind::Turbidity.to_string(), "turb");
        assert_eq!(
            SensorKind::Ph.set_arguments(),
            ["neutral voltage", "acid voltage"]
        );
        assert_eq!(
            SensorKind::Turbidity.set_arguments(),
            ["slope", "intercept"]
        );
    }

    #[test]
    fn test_ec_calibration_keeps_low_below_high() {
        let swapped = EcCalibration::new(8.0, 2.0);
        assert_eq!(swapped.low(), 2.0);
        assert_eq!(swapped.high(), 8.0);

        let ordered = EcCalibration::from_pair(1.5, 12.88);
        assert_eq!(ordered.pair(), (1.5, 12.88));

        let equal = EcCalibration::new(3.0, 3.0);
        assert_eq!(equal.pair(), (3.0, 3.0));
    }

    #[test]
    fn test_ph_calibration_is_not_reordered() {
        let cal = PhCalibration::from_pair(2.5, 2.0);
        assert_eq!(cal.neutral_voltage, 2.5);
        assert_eq!(cal.acid_voltage, 2.0);
    }

    #[test]
    fn test_turbidity_transform() {
        assert_eq!(TurbidityCalibration::default().apply(30), 30.0);
        assert_eq!(TurbidityCalibration::new(2.0, 1.0).apply(30), 61.0);
        assert_eq!(TurbidityCalibration::new(-0.5, 10.0).apply(4), 8.0);
    }

    #[test]
    fn test_median_of_five() {
        let mut samples = [10, 50, 20, 40, 30];
        assert_eq!(median_of(&mut samples), 30);
        assert_eq!(samples, [10, 20, 30, 40, 50]);

        // A single outlier does not move the median
        let mut spiky = [512, 515, 4095, 510, 514];
        assert_eq!(median_of(&mut spiky), 514);
    }

    #[test]
    fn test_transition_reports_first_field_first() {
        let t = CalibrationTransition::new(
            PhCalibration::new(1500.0, 2032.44),
            PhCalibration::new(1510.0, 2040.0),
        );
        assert_eq!(
            t.change(),
            CalibrationChange::Changed {
                field: "neutral",
                from: 1500.0,
                to: 1510.0,
            }
        );
    }

    #[test]
    fn test_transition_reports_second_field() {
        let t = CalibrationTransition::new(
            EcCalibration::new(1.0, 1.0),
            EcCalibration::new(1.0, 1.2),
        );
        assert_eq!(
            t.change(),
            CalibrationChange::Changed {
                field: "high",
                from: 1.0,
                to: 1.2,
            }
        );
    }

    #[test]
    fn test_transition_unchanged() {
        let cal = EcCalibration::default();
        assert_eq!(
            CalibrationTransition::new(cal, cal).change(),
            CalibrationChange::Unchanged
        );
    }
}
