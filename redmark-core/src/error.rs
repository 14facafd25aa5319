//! Core error types

use thiserror::Error;

/// Errors produced while building engine components.
///
/// The annotation pipeline itself is total over its input domain: once an
/// annotator is constructed, annotation, merging, composition, and quiz
/// generation never fail. Fallibility is confined to profile loading and
/// rule construction.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Profile failed validation
    #[error("profile error: {0}")]
    Profile(String),

    /// A rule pattern failed to compile
    #[error("invalid pattern for rule `{id}`: {source}")]
    Rule {
        /// Identifier of the offending rule
        id: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A matcher reported a scan failure
    #[error("matcher error: {0}")]
    Matcher(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON error at the ingestion boundary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading a profile or input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
