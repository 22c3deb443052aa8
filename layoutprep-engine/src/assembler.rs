//! Page assembly
//!
//! Turns recognizer output into a [`Page`]: every word gets its normalized
//! box and starts out labeled `O`.

use crate::error::Result;
use crate::ocr::OcrPage;
use layoutprep_core::{Page, Word};
use std::path::Path;

/// Builds pages from OCR output
#[derive(Debug, Clone, Default)]
pub struct PageAssembler;

impl PageAssembler {
    /// Create a new page assembler
    pub fn new() -> Self {
        Self
    }

    /// Assemble page `page_index` of `doc_id`
    ///
    /// Fails with a degenerate-image error when the recognizer reported a
    /// zero-sized page.
    pub fn assemble(&self, doc_id: &str, page_index: usize, image: &Path, ocr: OcrPage) -> Result<Page> {
        let words = ocr
            .words
            .into_iter()
            .map(|w| {
                let norm = w.bbox.normalize(ocr.image_size)?;
                Ok(Word::new(w.text, w.bbox, norm, w.confidence))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(doc_id, page_index, image, ocr.image_size, words))
    }
}
