//! Output formatting module

use anyhow::Result;
use serde::Serialize;

/// Render-ready view of one annotated sentence
#[derive(Debug, Clone, Serialize)]
pub struct SentenceReport {
    /// 0-based sentence index
    pub index: usize,
    /// Sentence text
    pub text: String,
    /// Classified sentence pattern, if any
    pub pattern: Option<String>,
    /// Labels of the rules that matched in the sentence
    pub tags: Vec<String>,
    /// Composed pieces in order
    pub pieces: Vec<PieceReport>,
}

/// Render-ready view of one composed piece
#[derive(Debug, Clone, Serialize)]
pub struct PieceReport {
    /// Piece text
    pub text: String,
    /// Role letters covering the piece ("S", "V", "O", "C")
    pub roles: Vec<String>,
    /// Headword of the covering vocabulary item, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocab: Option<String>,
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a single annotated sentence
    fn format_sentence(&mut self, report: &SentenceReport) -> Result<()>;

    /// Finalize output (e.g., close a JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
