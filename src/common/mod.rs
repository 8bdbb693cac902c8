// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod config;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{CalibrateMode, Command, EchoPayload};

// From config.rs
pub use config::ConsoleConfig;

// From error.rs
pub use error::{CommandError, ConsoleError};

// From hal_traits.rs
pub use hal_traits::{ConsoleInstant, ConsoleSerial, ConsoleTimer, TickInstant};

// From types.rs
pub use types::{
    median_of, CalibrationChange, CalibrationRecord, CalibrationTransition, EcCalibration,
    PhCalibration, SensorKind, TurbidityCalibration,
};

// Native HAL integration (from hal_traits.rs)
#[cfg(feature = "impl-native")]
pub use hal_traits::NativeInterface;
