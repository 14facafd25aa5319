//! CLI command implementations

use crate::error::CliResult;
use anyhow::Result;
use clap::Subcommand;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub mod annotate;
pub mod merge;
pub mod quiz;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Annotate text with grammar-role and vocabulary highlights
    Annotate(annotate::AnnotateArgs),

    /// Merge external grammar-checker matches into a non-overlapping index
    Merge(merge::MergeArgs),

    /// Generate quiz items from annotated text
    Quiz(quiz::QuizArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Annotate(args) => args.execute(),
            Commands::Merge(args) => args.execute(),
            Commands::Quiz(args) => args.execute(),
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// Pretty-printed JSON
    Json,
    /// Markdown formatted output
    Markdown,
}

/// Read input text from a file, or stdin when no path is given
pub(crate) fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Open the output writer: a file, or stdout when no path is given
pub(crate) fn open_output(path: Option<&PathBuf>) -> CliResult<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(fs::File::create(path)?)),
        None => Ok(Box::new(std::io::stdout())),
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level),
    )
    .try_init();
}
