//! Page, word and chunk entities

use crate::bbox::{ImageSize, NormBox, PixelBox};
use crate::label::{record_id, LabelId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One OCR-recognized text span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Recognized text
    pub text: String,
    /// Box in image pixels
    pub bbox_px: PixelBox,
    /// Box in the `0..=1000` space
    pub bbox_norm: NormBox,
    /// OCR confidence the word was accepted with
    pub confidence: f32,
    /// Section label, `O` until the labeler runs
    pub label: LabelId,
}

impl Word {
    /// Create an unlabeled word
    pub fn new(text: impl Into<String>, bbox_px: PixelBox, bbox_norm: NormBox, confidence: f32) -> Self {
        Self {
            text: text.into(),
            bbox_px,
            bbox_norm,
            confidence,
            label: LabelId::Outside,
        }
    }
}

/// One rasterized page with its OCR words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Document the page belongs to
    pub doc_id: String,
    /// Zero-based page position in the document
    pub page_index: usize,
    /// Path of the page image
    pub image_ref: PathBuf,
    /// Image dimensions in pixels
    pub image_size: ImageSize,
    /// Words in reading order
    pub words: Vec<Word>,
}

impl Page {
    /// Create a page
    pub fn new(
        doc_id: impl Into<String>,
        page_index: usize,
        image_ref: impl Into<PathBuf>,
        image_size: ImageSize,
        words: Vec<Word>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            page_index,
            image_ref: image_ref.into(),
            image_size,
            words,
        }
    }

    /// Word texts in order
    pub fn texts(&self) -> Vec<&str> {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }

    /// Normalized boxes in order
    pub fn boxes(&self) -> Vec<NormBox> {
        self.words.iter().map(|w| w.bbox_norm).collect()
    }

    /// Labels in order
    pub fn labels(&self) -> Vec<LabelId> {
        self.words.iter().map(|w| w.label).collect()
    }

    /// Whether the page has no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// One position of a model window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubToken {
    /// Vocabulary id reported by the tokenizer
    pub token_id: u32,
    /// Index of the page word this sub-token came from (`None` for special and padding positions)
    pub source_word_index: Option<usize>,
    /// Box copied from the source word, zero box otherwise
    pub bbox_norm: NormBox,
    /// Label copied from the source word, `None` for the ignore sentinel
    pub label: Option<LabelId>,
    /// 1 for attended positions, 0 for padding
    pub attention: u8,
}

impl SubToken {
    /// Attended position carrying the box and label of page word `word_index`
    pub fn word(token_id: u32, word_index: usize, bbox_norm: NormBox, label: LabelId) -> Self {
        Self {
            token_id,
            source_word_index: Some(word_index),
            bbox_norm,
            label: Some(label),
            attention: 1,
        }
    }

    /// Attended position that belongs to no word (CLS, SEP, ...)
    pub fn special(token_id: u32) -> Self {
        Self {
            token_id,
            source_word_index: None,
            bbox_norm: NormBox::ZERO,
            label: None,
            attention: 1,
        }
    }

    /// Padding position
    pub fn padding(pad_token_id: u32) -> Self {
        Self {
            token_id: pad_token_id,
            source_word_index: None,
            bbox_norm: NormBox::ZERO,
            label: None,
            attention: 0,
        }
    }

    /// Whether this position is attended
    pub fn is_attended(&self) -> bool {
        self.attention == 1
    }
}

/// Fixed-length window over one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Document the page belongs to
    pub doc_id: String,
    /// Page the window was cut from
    pub page_index: usize,
    /// Position of this window among the page's windows
    pub chunk_index: usize,
    /// Sample group reported by the tokenizer
    pub overflow_sample_index: usize,
    /// Exactly `max_length` positions
    pub sub_tokens: Vec<SubToken>,
    /// Path of the page image
    pub image_ref: PathBuf,
}

impl Chunk {
    /// Window length
    pub fn len(&self) -> usize {
        self.sub_tokens.len()
    }

    /// Whether the window has no positions
    pub fn is_empty(&self) -> bool {
        self.sub_tokens.is_empty()
    }

    /// Token ids, in order
    pub fn input_ids(&self) -> Vec<u32> {
        self.sub_tokens.iter().map(|t| t.token_id).collect()
    }

    /// Attention mask, in order
    pub fn attention_mask(&self) -> Vec<u8> {
        self.sub_tokens.iter().map(|t| t.attention).collect()
    }

    /// Boxes, in order
    pub fn boxes(&self) -> Vec<NormBox> {
        self.sub_tokens.iter().map(|t| t.bbox_norm).collect()
    }

    /// Numeric label ids with `-100` for ignored positions
    pub fn label_ids(&self) -> Vec<i64> {
        self.sub_tokens.iter().map(|t| record_id(t.label)).collect()
    }
}
