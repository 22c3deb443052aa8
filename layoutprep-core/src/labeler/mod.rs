//! Heuristic section-heading labeler
//!
//! A single left-to-right scan over a page's words. At each position the
//! matchers from [`patterns`] are tried in precedence order (vocabulary, Roman
//! heading, Roman sub-section); the first hit consumes its run, otherwise the
//! word is `O` and the scan moves one word on.

pub mod cursor;
pub mod patterns;

pub use cursor::WordCursor;
pub use patterns::{PatternKind, PatternMatch};

use crate::label::LabelId;
use crate::rules::HeadingRules;
use crate::types::Page;

/// Section labeler bound to a set of heading rules
#[derive(Debug, Clone, Default)]
pub struct SectionLabeler {
    rules: HeadingRules,
}

impl SectionLabeler {
    /// Labeler with the given rules
    pub fn new(rules: HeadingRules) -> Self {
        Self { rules }
    }

    /// Rules in use
    pub fn rules(&self) -> &HeadingRules {
        &self.rules
    }

    /// Label a word sequence; the output is parallel to the input
    pub fn label<S: AsRef<str>>(&self, words: &[S]) -> Vec<LabelId> {
        let mut labels = Vec::with_capacity(words.len());
        let mut cursor = WordCursor::new(words);

        while !cursor.at_end() {
            match self.match_at(&cursor) {
                Some(run) if !run.is_empty() => {
                    cursor.advance(run.len());
                    labels.extend(run.labels);
                }
                _ => {
                    cursor.advance(1);
                    labels.push(LabelId::Outside);
                }
            }
        }

        labels
    }

    /// First matcher that claims the cursor position
    pub fn match_at<S: AsRef<str>>(&self, cursor: &WordCursor<'_, S>) -> Option<PatternMatch> {
        PatternKind::PRECEDENCE
            .into_iter()
            .find_map(|kind| kind.try_match(cursor, &self.rules))
    }

    /// Label a page in place
    pub fn label_page(&self, page: &mut Page) {
        let labels = self.label(&page.texts());
        for (word, label) in page.words.iter_mut().zip(labels) {
            word.label = label;
        }
    }
}
