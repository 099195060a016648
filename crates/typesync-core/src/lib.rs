//! # typesync-core
//!
//! Core functionality for typesync - a generator that keeps closed string
//! enumerations in sync with a large, evolving source checkout.
//!
//! Two pipelines share one design pattern (scan → aggregate → classify →
//! rewrite):
//!
//! - **Type scanning**: pattern rules discover content-type, extra-name, and
//!   resource-name string constants across a Rust source tree; occurrences
//!   are aggregated, classified, and emitted as regenerated enum
//!   declarations inside the canonical constants text.
//! - **Binding transformation**: machine-generated declaration files (one
//!   exported string-literal-union type each) are rewritten into
//!   runtime-checkable enumerations plus an aggregated re-export index.
//!
//! ## Quick start
//!
//! ```no_run
//! use typesync_core::{Layout, pipeline};
//!
//! # async fn run() -> typesync_core::Result<()> {
//! let layout = Layout::new("core", "src");
//! layout.ensure_core_present()?;
//!
//! let outcome = pipeline::run_scan(&layout).await?;
//! println!("{} content types", outcome.content.records.len());
//!
//! pipeline::apply_enum_updates(&layout, &outcome).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! All operations return [`Result<T, Error>`]; precondition failures carry a
//! remediation message, structural mismatches inside the constants text are
//! surfaced as skipped updates rather than errors, and I/O failures abort
//! the run for a clean re-run after the cause is fixed.

mod macros;

/// Rewriting of generated declaration files into runtime enumerations
pub mod bindings;
/// Final filtering, ordering, and partitioning of discovered values
pub mod classify;
/// Fixed file-path conventions of a run
pub mod config;
/// Recursive discovery of scannable files
pub mod discovery;
/// Regeneration of enum declarations in the constants text
pub mod enums;
/// Error types and result aliases
pub mod error;
/// Accumulation of discovered values across scanned files
pub mod occurrences;
/// Category pipelines and declaration rewrites
pub mod pipeline;
/// Resolution of declared constants and the legacy exclusion set
pub mod resolver;
/// Match rules for the surface syntactic forms of a value
pub mod rules;
/// Per-file scanning
pub mod scanner;
/// Core data types
pub mod types;

// Re-export commonly used types
pub use classify::{Classified, Partition, classify};
pub use config::Layout;
pub use error::{Error, Result};
pub use occurrences::OccurrenceIndex;
pub use pipeline::{BindingsOutcome, EnumUpdate, ScanOutcome, ScanSummary};
pub use scanner::ScanContext;
pub use types::{Category, ContextTag, Occurrence, RawMatch, ValueRecord};
