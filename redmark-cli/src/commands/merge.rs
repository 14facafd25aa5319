//! Merge command implementation

use super::{init_logging, open_output, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use redmark_core::{collapse_whitespace, merge_matches_in, CheckerMatch, MergedMatch};
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the merge command
#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Checker matches (JSON array) to merge
    #[arg(short, long, value_name = "FILE", required = true)]
    pub matches: PathBuf,

    /// Original text file; when given, out-of-bounds matches are dropped
    #[arg(short, long, value_name = "FILE")]
    pub text: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl MergeArgs {
    /// Execute the merge command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let json = std::fs::read_to_string(&self.matches)
            .with_context(|| format!("failed to read matches {}", self.matches.display()))?;
        let matches = CheckerMatch::from_json(&json)?;
        log::info!("loaded {} checker matches", matches.len());

        let text_len = match &self.text {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read text {}", path.display()))?;
                Some(collapse_whitespace(&text).len())
            }
            None => None,
        };

        let merged = merge_matches_in(matches, text_len);
        log::info!("{} matches after merging", merged.len());

        let mut writer = open_output(self.output.as_ref())?;
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, &merged)?;
                writeln!(writer)?;
            }
            OutputFormat::Text => write_text(&mut writer, &merged)?,
            OutputFormat::Markdown => write_markdown(&mut writer, &merged)?,
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_text(writer: &mut dyn Write, merged: &[MergedMatch]) -> Result<()> {
    for m in merged {
        write!(writer, "[{}] {}..{} {}", m.index, m.offset, m.end(), m.message)?;
        if let Some(first) = m.replacements.first() {
            write!(writer, " -> {first}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn write_markdown(writer: &mut dyn Write, merged: &[MergedMatch]) -> Result<()> {
    writeln!(writer, "| # | span | message | suggestion |")?;
    writeln!(writer, "|---|------|---------|------------|")?;
    for m in merged {
        writeln!(
            writer,
            "| {} | {}..{} | {} | {} |",
            m.index,
            m.offset,
            m.end(),
            m.message,
            m.replacements.first().map(String::as_str).unwrap_or("-"),
        )?;
    }
    Ok(())
}
