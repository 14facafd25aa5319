//! Quiz command implementation

use super::{init_logging, open_output, read_input, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use redmark_core::{build_quizzes, Annotator, QuizItem, RuleProfile};
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the quiz command
#[derive(Debug, Args)]
pub struct QuizArgs {
    /// Input text file (stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Custom rule profile (TOML); built-in English profile when omitted
    #[arg(short, long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl QuizArgs {
    /// Execute the quiz command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let profile = match &self.profile {
            Some(path) => RuleProfile::from_file(path)
                .with_context(|| format!("failed to load profile {}", path.display()))?,
            None => RuleProfile::builtin_english(),
        };
        let annotator = Annotator::builder().profile(profile).build();

        let text = read_input(self.input.as_deref())?;
        let annos = annotator.annotate(&text);
        let quizzes = build_quizzes(&annos);
        log::info!("generated {} quiz items", quizzes.len());

        let mut writer = open_output(self.output.as_ref())?;
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, &quizzes)?;
                writeln!(writer)?;
            }
            OutputFormat::Text | OutputFormat::Markdown => write_text(&mut writer, &quizzes)?,
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_text(writer: &mut dyn Write, quizzes: &[QuizItem]) -> Result<()> {
    for (i, quiz) in quizzes.iter().enumerate() {
        match quiz {
            QuizItem::Cloze { prompt, answer } => {
                writeln!(writer, "{}. Fill in the blank: {prompt}", i + 1)?;
                writeln!(writer, "   answer: {answer}")?;
            }
            QuizItem::Choice {
                prompt,
                options,
                answer,
            } => {
                writeln!(writer, "{}. Which pattern fits: {prompt}", i + 1)?;
                for (j, option) in options.iter().enumerate() {
                    let letter = (b'a' + j as u8) as char;
                    writeln!(writer, "   {letter}) {option}")?;
                }
                writeln!(writer, "   answer: {answer}")?;
            }
            QuizItem::Read { prompt } => {
                writeln!(writer, "{}. Read aloud: {prompt}", i + 1)?;
            }
        }
    }
    Ok(())
}
