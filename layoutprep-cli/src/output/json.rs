//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use layoutprep_core::LabelId;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs labeled words as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    words: Vec<LabeledWord>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LabeledWord {
    /// The word text
    pub word: String,
    /// Tag name
    pub label: LabelId,
    /// Numeric label id
    pub id: u8,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            words: Vec::new(),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_word(&mut self, word: &str, label: LabelId) -> Result<()> {
        self.words.push(LabeledWord {
            word: word.to_string(),
            label,
            id: label.id(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.words)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
