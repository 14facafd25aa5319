//! CLI error types

use thiserror::Error;

/// CLI-level errors.
///
/// Command-specific failures (profile loading, JSON parsing) carry
/// their context through `anyhow`; only the shared input/output
/// helpers produce a typed error.
#[derive(Error, Debug)]
pub enum CliError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = std::result::Result<T, CliError>;
