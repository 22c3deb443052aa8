//! Label command implementation

use crate::input::WordReader;
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};
use anyhow::{Context, Result};
use clap::Args;
use layoutprep_core::{HeadingRules, SectionLabeler};
use std::io;
use std::path::PathBuf;

/// Arguments for the label command
#[derive(Debug, Args)]
pub struct LabelArgs {
    /// Text file with whitespace-separated words (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Heading rules file
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `word<TAB>label` line per word
    Text,
    /// JSON array of labeled words
    Json,
}

impl LabelArgs {
    /// Execute the label command
    pub fn execute(&self) -> Result<()> {
        let rules = match &self.rules {
            Some(path) => HeadingRules::from_file(path)
                .with_context(|| format!("Failed to load heading rules: {}", path.display()))?,
            None => HeadingRules::default(),
        };
        let words = WordReader::read(self.input.as_deref())?;

        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::stdout()),
            OutputFormat::Json => Box::new(JsonFormatter::new(io::stdout())),
        };
        label_words(&SectionLabeler::new(rules), &words, formatter.as_mut())
    }
}

/// Label `words` and hand each one to `formatter`
pub fn label_words(
    labeler: &SectionLabeler,
    words: &[String],
    formatter: &mut dyn OutputFormatter,
) -> Result<()> {
    let labels = labeler.label(words);
    for (word, label) in words.iter().zip(labels) {
        formatter.format_word(word, label)?;
    }
    formatter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::WordReader;
    use layoutprep_core::LabelId;

    struct Collect(Vec<(String, LabelId)>);

    impl OutputFormatter for Collect {
        fn format_word(&mut self, word: &str, label: LabelId) -> Result<()> {
            self.0.push((word.to_string(), label));
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_label_words_in_order() {
        let words = WordReader::split("II. RELATED WORK Prior work");
        let mut out = Collect(Vec::new());
        label_words(&SectionLabeler::default(), &words, &mut out).unwrap();

        let labels: Vec<LabelId> = out.0.iter().map(|(_, l)| *l).collect();
        assert_eq!(
            labels,
            vec![
                LabelId::BeginSection,
                LabelId::InsideSection,
                LabelId::InsideSection,
                LabelId::Outside,
                LabelId::Outside
            ]
        );
        assert_eq!(out.0[1].0, "RELATED");
    }

    #[test]
    fn test_empty_input() {
        let mut out = Collect(Vec::new());
        label_words(&SectionLabeler::default(), &[], &mut out).unwrap();
        assert!(out.0.is_empty());
    }
}
