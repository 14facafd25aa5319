//! Plain text output formatter

use super::{OutputFormatter, SentenceReport};
use anyhow::Result;
use std::io::Write;

/// Text formatter - one sentence per block with inline role markers
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_sentence(&mut self, report: &SentenceReport) -> Result<()> {
        let pattern = report.pattern.as_deref().unwrap_or("unclassified");
        writeln!(self.writer, "[{}] {} ({pattern})", report.index, report.text)?;

        for piece in &report.pieces {
            if piece.roles.is_empty() && piece.vocab.is_none() {
                continue;
            }
            let mut marks = piece.roles.join(",");
            if let Some(word) = &piece.vocab {
                if !marks.is_empty() {
                    marks.push(',');
                }
                marks.push_str("vocab:");
                marks.push_str(word);
            }
            writeln!(self.writer, "    {:<20} {marks}", piece.text)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
