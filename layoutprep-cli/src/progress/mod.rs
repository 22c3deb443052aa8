//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use layoutprep_engine::DocumentResult;
use std::time::Duration;

const TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} documents {msg}";

/// Progress reporter for document processing
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize progress bar for document processing
    pub fn init_documents(&mut self, total: u64) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        match ProgressStyle::default_bar().template(TEMPLATE) {
            Ok(style) => pb.set_style(style.progress_chars("##-")),
            Err(e) => log::debug!("Falling back to the default progress style: {e}"),
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a finished document
    pub fn document_completed(&self, result: &DocumentResult) {
        if let Some(pb) = &self.progress_bar {
            match result {
                Ok(output) => pb.set_message(format!("Processed: {}", output.doc_id)),
                Err(failure) => pb.set_message(format!("Failed: {}", failure.doc_id)),
            }
            pb.inc(1);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_has_no_bar() {
        let mut reporter = ProgressReporter::new(true);
        reporter.init_documents(3);
        assert!(reporter.progress_bar.is_none());
        reporter.finish();
    }

    #[test]
    fn test_bar_counts_documents() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init_documents(2);
        let failure = layoutprep_engine::DocumentFailure {
            doc_id: "scan".to_string(),
            stage: layoutprep_engine::Stage::Ocr,
            error: layoutprep_engine::EngineError::ConfigError("x".to_string()),
        };
        reporter.document_completed(&Err(failure));
        assert_eq!(reporter.progress_bar.as_ref().unwrap().position(), 1);
        reporter.finish();
    }
}
