//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use layoutprep_core::LabelId;
use std::io::{self, Write};

/// Plain text formatter - one `word<TAB>label` line per word
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_word(&mut self, word: &str, label: LabelId) -> Result<()> {
        writeln!(self.writer, "{word}\t{label}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_separated_lines() {
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.format_word("II.", LabelId::BeginSection).unwrap();
        formatter.format_word("Work", LabelId::InsideSection).unwrap();
        formatter.finish().unwrap();

        let out = String::from_utf8(formatter.into_inner()).unwrap();
        assert_eq!(out, "II.\tB-SEC\nWork\tI-SEC\n");
    }
}
