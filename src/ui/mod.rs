//! User interface and interaction
//!
//! This module contains CLI parsing, terminal output formatting
//! and progress reporting.

pub mod cli;
pub mod color;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use cli::{Cli, cli_to_config, validate_cli_args};
pub use output::RunSummary;
pub use progress::ProgressReporter;
