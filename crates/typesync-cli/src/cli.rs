//! CLI structure and argument parsing for `typesync`.
//!
//! Two subcommands map onto the two pipelines:
//!
//! - `typesync scan` discovers domain string constants across the core
//!   checkout, prints the occurrence report, and regenerates the enum
//!   declarations in the canonical constants file.
//! - `typesync bindings` rewrites generated declaration files into
//!   runtime-checkable enumerations and emits the re-export index.
//!
//! ```bash
//! typesync scan
//! typesync scan --dry-run -f json
//! typesync bindings --root ../core --target sdk/src
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Top-level CLI for the `typesync` command.
#[derive(Parser, Debug)]
#[command(name = "typesync")]
#[command(version)]
#[command(about = "Keep generated string-enum declarations in sync with a source checkout", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the core checkout and regenerate the enum declarations
    Scan {
        /// Root of the core checkout to scan
        #[arg(long, value_name = "DIR", default_value = "core")]
        root: PathBuf,

        /// Destination directory for generated output
        #[arg(long, value_name = "DIR", default_value = "src")]
        target: PathBuf,

        /// Print the report without rewriting the constants file
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Transform generated declaration files and write the re-export index
    Bindings {
        /// Root of the core checkout holding the declaration files
        #[arg(long, value_name = "DIR", default_value = "core")]
        root: PathBuf,

        /// Destination directory for transformed declarations
        #[arg(long, value_name = "DIR", default_value = "src")]
        target: PathBuf,
    },
}
