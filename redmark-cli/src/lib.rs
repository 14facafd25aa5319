//! Redmark CLI library
//!
//! This library provides the command-line interface for the redmark
//! text annotation engine.

pub mod commands;
pub mod error;
pub mod output;

pub use error::{CliError, CliResult};
