//! Sub-tokenizer boundary
//!
//! The windower never splits words itself. It hands a page to an
//! [`OverflowTokenizer`] and gets back fixed-size windows with a sub-token to
//! word mapping, the same shape a HuggingFace processor returns with
//! `return_overflowing_tokens=True`.

use crate::bbox::NormBox;
use crate::error::Result;
use crate::label::LabelId;
use std::path::Path;

/// One page handed to the tokenizer
#[derive(Debug, Clone, Copy)]
pub struct EncodeRequest<'a> {
    /// Word texts
    pub words: &'a [&'a str],
    /// Normalized word boxes, parallel to `words`
    pub boxes: &'a [NormBox],
    /// Word labels, parallel to `words`
    pub labels: &'a [LabelId],
    /// Page image
    pub image: &'a Path,
    /// Sub-tokens per window, special tokens included
    pub max_length: usize,
    /// Sub-tokens shared by consecutive windows
    pub stride: usize,
}

/// One window as reported by the tokenizer
///
/// All vectors are parallel. `boxes` and `labels` are the tokenizer's own
/// expansion of the word-level inputs; the windower checks them against the
/// page instead of trusting them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodedWindow {
    /// Vocabulary ids
    pub input_ids: Vec<u32>,
    /// 1 for attended positions
    pub attention_mask: Vec<u8>,
    /// Source word per position
    pub word_ids: Vec<Option<usize>>,
    /// Expanded boxes
    pub boxes: Vec<NormBox>,
    /// Expanded labels, `None` where the tokenizer ignores the position
    pub labels: Vec<Option<LabelId>>,
    /// Input sample this window overflowed from
    pub overflow_to_sample: usize,
}

impl EncodedWindow {
    /// Number of positions, if all vectors agree
    pub fn consistent_len(&self) -> Option<usize> {
        let len = self.input_ids.len();
        let agree = self.attention_mask.len() == len
            && self.word_ids.len() == len
            && self.boxes.len() == len
            && self.labels.len() == len;
        agree.then_some(len)
    }
}

/// Sub-tokenization with truncation, stride and overflow
pub trait OverflowTokenizer: Send + Sync {
    /// Split a page into overlapping windows
    ///
    /// An empty page may yield no windows at all.
    fn encode_with_overflow(&self, request: &EncodeRequest<'_>) -> Result<Vec<EncodedWindow>>;

    /// Id used for padding positions
    fn pad_token_id(&self) -> u32;

    /// Human-readable backend name
    fn name(&self) -> &'static str;
}

impl<T: OverflowTokenizer + ?Sized> OverflowTokenizer for Box<T> {
    fn encode_with_overflow(&self, request: &EncodeRequest<'_>) -> Result<Vec<EncodedWindow>> {
        (**self).encode_with_overflow(request)
    }

    fn pad_token_id(&self) -> u32 {
        (**self).pad_token_id()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
