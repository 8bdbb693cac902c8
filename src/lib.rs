// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod common;
pub mod console;

// Re-export key types for convenience
pub use common::{CommandError, ConsoleConfig, ConsoleError, SensorKind};
pub use console::sync_console::{PollStatus, SyncConsole};
