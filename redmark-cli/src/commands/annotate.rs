//! Annotate command implementation

use super::{init_logging, open_output, read_input, OutputFormat};
use crate::output::{
    JsonFormatter, MarkdownFormatter, OutputFormatter, PieceReport, SentenceReport, TextFormatter,
};
use anyhow::{Context, Result};
use clap::Args;
use redmark_core::{
    compose, find_vocab_spans, grammar_only_pieces, Annotator, Category, HighlightFilters,
    RuleProfile, Stage, VocabItem,
};
use std::path::PathBuf;

/// Arguments for the annotate command
#[derive(Debug, Args)]
pub struct AnnotateArgs {
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

    /// Restrict rules to one school stage
    #[arg(long, value_enum)]
    pub stage: Option<StageArg>,

    /// Restrict rules to categories (repeatable)
    #[arg(long, value_enum)]
    pub category: Vec<CategoryArg>,

    /// Only output pieces carrying role tags
    #[arg(long)]
    pub grammar_only: bool,

    /// Free-text filter over rule labels and ids
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Vocabulary list (JSON array of items with a "word" field)
    #[arg(long, value_name = "FILE")]
    pub vocab: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// School stage filter values
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StageArg {
    /// Junior high school rules
    Jh,
    /// Senior high school rules
    Sh,
}

impl From<StageArg> for Stage {
    fn from(value: StageArg) -> Self {
        match value {
            StageArg::Jh => Stage::Jh,
            StageArg::Sh => Stage::Sh,
        }
    }
}

/// Rule category filter values
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CategoryArg {
    /// Sentence-pattern (role) rules
    Pattern,
    /// Tense constructions
    Tense,
    /// Infinitive constructions
    Infinitive,
    /// Gerund constructions
    Gerund,
    /// Relative clauses
    Relative,
    /// Comparatives and superlatives
    Comparison,
    /// Passive voice
    Passive,
    /// Prepositional phrases
    Preposition,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Pattern => Category::Pattern,
            CategoryArg::Tense => Category::Tense,
            CategoryArg::Infinitive => Category::Infinitive,
            CategoryArg::Gerund => Category::Gerund,
            CategoryArg::Relative => Category::Relative,
            CategoryArg::Comparison => Category::Comparison,
            CategoryArg::Passive => Category::Passive,
            CategoryArg::Preposition => Category::Preposition,
        }
    }
}

impl AnnotateArgs {
    /// Execute the annotate command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let annotator = self.build_annotator()?;
        let vocab = self.load_vocab()?;
        let text = read_input(self.input.as_deref())?;

        let reports = annotate_to_reports(&annotator, &text, &vocab);

        let writer = open_output(self.output.as_ref())?;
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        };
        for report in &reports {
            formatter.format_sentence(report)?;
        }
        formatter.finish()
    }

    fn build_annotator(&self) -> Result<Annotator> {
        let profile = match &self.profile {
            Some(path) => RuleProfile::from_file(path)
                .with_context(|| format!("failed to load profile {}", path.display()))?,
            None => RuleProfile::builtin_english(),
        };

        let filters = HighlightFilters {
            stages: self.stage.map(|s| vec![s.into()]).unwrap_or_default(),
            categories: self.category.iter().map(|&c| c.into()).collect(),
            grammar_only: self.grammar_only,
            query: self.query.clone(),
        };

        Ok(Annotator::builder().profile(profile).filters(filters).build())
    }

    fn load_vocab(&self) -> Result<Vec<VocabItem>> {
        match &self.vocab {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read vocabulary {}", path.display()))?;
                Ok(serde_json::from_str(&json)?)
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Annotate text and compose each sentence into a render-ready report
pub fn annotate_to_reports(
    annotator: &Annotator,
    text: &str,
    vocab: &[VocabItem],
) -> Vec<SentenceReport> {
    annotator
        .annotate(text)
        .into_iter()
        .enumerate()
        .map(|(index, anno)| {
            let vocab_spans = find_vocab_spans(&anno.text, vocab);
            let mut pieces = compose(&anno.text, &anno.spans, &vocab_spans);
            if annotator.filters().grammar_only {
                pieces = grammar_only_pieces(pieces);
            }
            SentenceReport {
                index,
                pattern: anno.pattern(),
                tags: anno.tags.iter().map(|t| t.label.clone()).collect(),
                pieces: pieces
                    .into_iter()
                    .map(|p| PieceReport {
                        text: p.text,
                        roles: p.roles.iter().map(|r| r.letter().to_string()).collect(),
                        vocab: p.vocab.map(|v| v.word),
                    })
                    .collect(),
                text: anno.text,
            }
        })
        .collect()
}
