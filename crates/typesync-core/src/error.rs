//! Error types and handling for typesync-core operations.
//!
//! Errors are grouped by the pipeline stage they originate from:
//!
//! - **I/O errors**: reading scanned files, writing rewritten declarations
//! - **Parse errors**: constants text or declaration files that do not match
//!   the expected surface shapes
//! - **Configuration errors**: invalid layout roots or target directories
//! - **Not found**: missing preconditions such as the scan root or the
//!   declaration source directory

use thiserror::Error;

/// The main error type for typesync-core operations.
///
/// All public functions in typesync-core return `Result<T, Error>`. The
/// source chain of wrapped I/O errors is preserved for diagnostics.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading scanned source files, reading the canonical constants
    /// text, and writing rewritten declaration files. The underlying
    /// `std::io::Error` is preserved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input text did not match an expected surface shape.
    ///
    /// Raised when a pattern that must exist (for example a dynamically
    /// built enum-block expression) cannot be compiled or applied.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Layout or settings are invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required path or declaration was not found.
    ///
    /// Used for precondition failures such as a missing scan root (detected
    /// via its marker subdirectory) or a missing declaration source
    /// directory. These abort the run before any scanning begins.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Get the error category as a string identifier.
    ///
    /// Useful for grouping failures in logs without matching on variants.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
