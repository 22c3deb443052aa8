//! Output formatting module

use anyhow::Result;
use layoutprep_core::LabelId;

/// Trait for label output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one labeled word
    fn format_word(&mut self, word: &str, label: LabelId) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
