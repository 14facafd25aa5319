//! JSON output formatter

use super::{OutputFormatter, SentenceReport};
use anyhow::Result;
use std::io::Write;

/// JSON formatter - outputs annotated sentences as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    sentences: Vec<SentenceReport>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sentences: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_sentence(&mut self, report: &SentenceReport) -> Result<()> {
        self.sentences.push(report.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.sentences)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
