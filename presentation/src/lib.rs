//! Presentation layer for scribe
//!
//! This crate contains the CLI definition, output formatters and
//! progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::history::format_history;
pub use output::report::format_report;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
