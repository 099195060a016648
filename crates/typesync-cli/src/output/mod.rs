//! Output formatting for the typesync CLI.
//!
//! Text output is the per-category occurrence report carried over from the
//! tool this replaces; JSON output is the combined classified-lists
//! structure for scripting.

pub mod json;
pub mod report;

use clap::ValueEnum;

/// Output format options supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable occurrence report
    Text,
    /// Machine-readable classified lists
    Json,
}
