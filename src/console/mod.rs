// src/console/mod.rs

// Shared logic
pub mod context;   // The single owned command line buffer
pub mod handler;   // Sensor driver traits (user implements these)
pub mod tokenizer; // Cursor-based token scanner over a framed line
mod formatter;     // Logic to render Response -> byte stream
mod parser;        // Dispatch tree: tokens -> Command
mod response;      // Response lines the console can emit

// Synchronous runner
pub mod sync_console;

// --- Public Re-exports ---
pub use context::CommandContext;
pub use handler::{CalibratedProbe, Sensors, TurbiditySensor};
pub use parser::parse_command;
pub use response::Response;
pub use sync_console::{PollStatus, SyncConsole};
pub use tokenizer::{Token, Tokenizer};
