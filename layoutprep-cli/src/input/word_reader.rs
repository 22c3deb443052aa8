//! Word input for the label command

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Reads whitespace-separated words from a file or stdin
pub struct WordReader;

impl WordReader {
    /// Read words from `path`, or from stdin when `path` is `None` or `-`
    pub fn read(path: Option<&Path>) -> Result<Vec<String>> {
        let text = match path {
            Some(path) if path != Path::new("-") => fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?,
            _ => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read stdin")?;
                text
            }
        };
        Ok(Self::split(&text))
    }

    /// Split text into OCR-style words
    pub fn split(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}
