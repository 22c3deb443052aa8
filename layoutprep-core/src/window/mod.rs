//! Overlapping sub-token windows over a labeled page
//!
//! The [`ChunkWindower`] hands the page to an [`OverflowTokenizer`], checks
//! every window the tokenizer returns against the page's words, rebuilds each
//! position from its source word, pads to `max_length` and attaches page and
//! chunk metadata.

pub mod encoding;
pub mod overflow;
pub mod piece;

pub use encoding::{EncodeRequest, EncodedWindow, OverflowTokenizer};
pub use overflow::{overflow_ranges, window_count};
pub use piece::{PieceTokenizer, CLS_TOKEN_ID, PAD_TOKEN_ID, SEP_TOKEN_ID};

use crate::bbox::NormBox;
use crate::error::{CoreError, Result};
use crate::label::LabelId;
use crate::types::{Chunk, Page, SubToken};
use std::path::Path;

/// Default sub-tokens per window
pub const DEFAULT_MAX_LENGTH: usize = 512;
/// Default overlap between consecutive windows
pub const DEFAULT_STRIDE: usize = 128;

/// Page identity carried into every chunk
#[derive(Debug, Clone, Copy)]
pub struct PageMeta<'a> {
    /// Document id
    pub doc_id: &'a str,
    /// Page position in the document
    pub page_index: usize,
    /// Page image
    pub image_ref: &'a Path,
}

/// Window geometry plus the alignment checks around a tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkWindower {
    max_length: usize,
    stride: usize,
}

impl Default for ChunkWindower {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            stride: DEFAULT_STRIDE,
        }
    }
}

impl ChunkWindower {
    /// Windower producing `max_length` positions that overlap by `stride`
    pub fn new(max_length: usize, stride: usize) -> Result<Self> {
        if max_length == 0 || stride >= max_length {
            return Err(CoreError::InvalidWindow { max_length, stride });
        }
        Ok(Self { max_length, stride })
    }

    /// Positions per chunk
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Positions shared by consecutive windows
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Window one labeled page
    pub fn window_page<T>(&self, page: &Page, tokenizer: &T) -> Result<Vec<Chunk>>
    where
        T: OverflowTokenizer + ?Sized,
    {
        let meta = PageMeta {
            doc_id: &page.doc_id,
            page_index: page.page_index,
            image_ref: &page.image_ref,
        };
        self.window(
            meta,
            &page.texts(),
            &page.boxes(),
            &page.labels(),
            tokenizer,
        )
    }

    /// Window parallel word, box and label sequences
    pub fn window<T>(
        &self,
        meta: PageMeta<'_>,
        words: &[&str],
        boxes: &[NormBox],
        labels: &[LabelId],
        tokenizer: &T,
    ) -> Result<Vec<Chunk>>
    where
        T: OverflowTokenizer + ?Sized,
    {
        if boxes.len() != words.len() || labels.len() != words.len() {
            return Err(CoreError::LabelingInput {
                reason: format!(
                    "{} words, {} boxes, {} labels on page {}",
                    words.len(),
                    boxes.len(),
                    labels.len(),
                    meta.page_index
                ),
            });
        }

        let request = EncodeRequest {
            words,
            boxes,
            labels,
            image: meta.image_ref,
            max_length: self.max_length,
            stride: self.stride,
        };
        let windows = tokenizer.encode_with_overflow(&request)?;

        windows
            .into_iter()
            .enumerate()
            .map(|(chunk_index, window)| {
                let sub_tokens =
                    self.align(meta.page_index, chunk_index, &window, boxes, labels, tokenizer.pad_token_id())?;
                Ok(Chunk {
                    doc_id: meta.doc_id.to_string(),
                    page_index: meta.page_index,
                    chunk_index,
                    overflow_sample_index: window.overflow_to_sample,
                    sub_tokens,
                    image_ref: meta.image_ref.to_path_buf(),
                })
            })
            .collect()
    }

    /// Check one tokenizer window against the page and rebuild its positions
    fn align(
        &self,
        page_index: usize,
        chunk_index: usize,
        window: &EncodedWindow,
        boxes: &[NormBox],
        labels: &[LabelId],
        pad_token_id: u32,
    ) -> Result<Vec<SubToken>> {
        let misaligned = |reason: String| CoreError::alignment(page_index, chunk_index, reason);

        let len = window
            .consistent_len()
            .ok_or_else(|| misaligned("window arrays differ in length".to_string()))?;
        if len > self.max_length {
            return Err(misaligned(format!(
                "{len} positions exceed max_length {}",
                self.max_length
            )));
        }

        let mut sub_tokens = Vec::with_capacity(self.max_length);
        for pos in 0..len {
            let token_id = window.input_ids[pos];
            let attended = window.attention_mask[pos] != 0;

            let sub_token = match (attended, window.word_ids[pos]) {
                (false, _) => SubToken {
                    token_id,
                    ..SubToken::padding(pad_token_id)
                },
                (true, None) => SubToken::special(token_id),
                (true, Some(word_index)) => {
                    let (Some(&bbox), Some(&label)) = (boxes.get(word_index), labels.get(word_index))
                    else {
                        return Err(misaligned(format!(
                            "position {pos} maps to word {word_index}, page has {}",
                            labels.len()
                        )));
                    };
                    if window.labels[pos].is_some_and(|l| l != label) {
                        return Err(misaligned(format!(
                            "position {pos} label differs from word {word_index}"
                        )));
                    }
                    if window.boxes[pos] != bbox {
                        return Err(misaligned(format!(
                            "position {pos} box differs from word {word_index}"
                        )));
                    }
                    SubToken::word(token_id, word_index, bbox, label)
                }
            };
            sub_tokens.push(sub_token);
        }

        sub_tokens.resize(self.max_length, SubToken::padding(pad_token_id));
        Ok(sub_tokens)
    }
}
