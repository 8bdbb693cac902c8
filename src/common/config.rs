// src/common/config.rs

use super::timing;
use core::time::Duration;

/// Runtime settings for a [`SyncConsole`](crate::console::sync_console::SyncConsole).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Idle time after the last received byte that ends a command line.
    pub inactivity_timeout: Duration,
    /// Wait between consecutive raw turbidity samples.
    pub turbidity_sample_delay: Duration,
    /// Print which EC field a `calibrate start` run changed.
    ///
    /// Older firmware printed only the start/end markers for EC runs that
    /// changed a value; clear this to reproduce that output.
    pub report_ec_calibration_changes: bool,
}

impl ConsoleConfig {
    pub const fn new() -> Self {
        Self {
            inactivity_timeout: timing::INPUT_INACTIVITY_TIMEOUT,
            turbidity_sample_delay: timing::TURBIDITY_SAMPLE_DELAY,
            report_ec_calibration_changes: true,
        }
    }

    pub const fn with_inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.inactivity_timeout = timeout;
        self
    }

    pub const fn with_turbidity_sample_delay(mut self, delay: Duration) -> Self {
        self.turbidity_sample_delay = delay;
        self
    }

    pub const fn with_ec_change_reports(mut self, enabled: bool) -> Self {
        self.report_ec_calibration_changes = enabled;
        self
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_protocol_timing() {
        let config = ConsoleConfig::default();
        assert_eq!(config.inactivity_timeout, Duration::from_millis(1000));
        assert_eq!(config.turbidity_sample_delay, Duration::from_millis(20));
        assert!(config.report_ec_calibration_changes);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConsoleConfig::new()
            .with_inactivity_timeout(Duration::from_millis(250))
            .with_ec_change_reports(false);
        assert_eq!(config.inactivity_timeout, Duration::from_millis(250));
        assert_eq!(
            config.turbidity_sample_delay,
            timing::TURBIDITY_SAMPLE_DELAY
        );
        assert!(!config.report_ec_calibration_changes);
    }
}
