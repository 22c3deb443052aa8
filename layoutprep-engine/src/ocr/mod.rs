//! OCR boundary
//!
//! The pipeline never runs a recognizer in-process. An [`OcrEngine`] turns a
//! page image into words with pixel boxes and confidences; [`TesseractOcr`]
//! reads Tesseract's TSV output.

pub mod tesseract;
pub mod tsv;

pub use tesseract::{OcrSource, TesseractOcr};
pub use tsv::parse_tsv;

use crate::error::Result;
use layoutprep_core::{ImageSize, PixelBox};
use std::path::Path;

/// One recognized word
#[derive(Debug, Clone, PartialEq)]
pub struct OcrWord {
    /// Trimmed text
    pub text: String,
    /// Box in image pixels
    pub bbox: PixelBox,
    /// Recognizer confidence, 0..=100
    pub confidence: f32,
}

/// Recognizer output for one page image
#[derive(Debug, Clone, PartialEq)]
pub struct OcrPage {
    /// Image dimensions the boxes refer to
    pub image_size: ImageSize,
    /// Words in reading order, already confidence-filtered
    pub words: Vec<OcrWord>,
}

/// Page image to words
pub trait OcrEngine: Send + Sync {
    /// Recognize `image`, keeping non-blank words with `confidence >= conf_threshold`
    fn recognize(&self, image: &Path, conf_threshold: f32) -> Result<OcrPage>;

    /// Human-readable backend name
    fn name(&self) -> &'static str;
}
