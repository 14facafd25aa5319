//! Markdown output formatter

use super::{OutputFormatter, SentenceReport};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - renders role spans in bold and vocabulary in italics
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    wrote_header: bool,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            wrote_header: false,
        }
    }
}

impl<W: Write> OutputFormatter for MarkdownFormatter<W> {
    fn format_sentence(&mut self, report: &SentenceReport) -> Result<()> {
        if !self.wrote_header {
            writeln!(self.writer, "# Annotated sentences\n")?;
            self.wrote_header = true;
        }

        let mut rendered = String::new();
        for piece in &report.pieces {
            if !piece.roles.is_empty() {
                rendered.push_str(&format!("**{}**", piece.text));
            } else if piece.vocab.is_some() {
                rendered.push_str(&format!("*{}*", piece.text));
            } else {
                rendered.push_str(&piece.text);
            }
        }

        let pattern = report.pattern.as_deref().unwrap_or("unclassified");
        writeln!(self.writer, "{}. {rendered}", report.index + 1)?;
        writeln!(self.writer, "   - pattern: `{pattern}`")?;
        if !report.tags.is_empty() {
            writeln!(self.writer, "   - tags: {}", report.tags.join(", "))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
