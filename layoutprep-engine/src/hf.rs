//! `tokenizer.json` backed sub-tokenizer
//!
//! Loads a HuggingFace fast tokenizer and uses its truncation with stride to
//! produce overflow windows. Boxes and labels are expanded from the word ids
//! the encoding reports.

use crate::error::{EngineError, Result};
use layoutprep_core::window::{EncodeRequest, EncodedWindow, OverflowTokenizer};
use layoutprep_core::{CoreError, NormBox};
use std::path::Path;
use tokenizers::{Encoding, Tokenizer, TruncationParams};

const PAD_TOKENS: [&str; 2] = ["<pad>", "[PAD]"];

/// HuggingFace tokenizer adapter
pub struct HfTokenizer {
    tokenizer: Tokenizer,
    pad_token_id: u32,
}

impl HfTokenizer {
    /// Load a `tokenizer.json`
    pub fn from_file(path: &Path) -> Result<Self> {
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            EngineError::external("tokenizer", format!("{}: {e}", path.display()))
        })?;
        Ok(Self::new(tokenizer))
    }

    /// Wrap an already built tokenizer
    pub fn new(tokenizer: Tokenizer) -> Self {
        let pad_token_id = tokenizer
            .get_padding()
            .map(|p| p.pad_id)
            .or_else(|| PAD_TOKENS.iter().find_map(|t| tokenizer.token_to_id(t)))
            .unwrap_or(0);
        Self {
            tokenizer,
            pad_token_id,
        }
    }
}

impl std::fmt::Debug for HfTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfTokenizer")
            .field("pad_token_id", &self.pad_token_id)
            .finish_non_exhaustive()
    }
}

fn tokenizer_error(e: impl std::fmt::Display) -> CoreError {
    CoreError::ExternalCapability {
        capability: "tokenizer",
        message: e.to_string(),
    }
}

fn to_window(encoding: &Encoding, request: &EncodeRequest<'_>) -> EncodedWindow {
    let word_ids: Vec<Option<usize>> = encoding
        .get_word_ids()
        .iter()
        .map(|w| w.map(|w| w as usize))
        .collect();

    EncodedWindow {
        input_ids: encoding.get_ids().to_vec(),
        attention_mask: encoding
            .get_attention_mask()
            .iter()
            .map(|m| u8::from(*m != 0))
            .collect(),
        boxes: word_ids
            .iter()
            .map(|w| w.and_then(|i| request.boxes.get(i).copied()).unwrap_or(NormBox::ZERO))
            .collect(),
        labels: word_ids
            .iter()
            .map(|w| w.and_then(|i| request.labels.get(i).copied()))
            .collect(),
        word_ids,
        overflow_to_sample: 0,
    }
}

impl OverflowTokenizer for HfTokenizer {
    fn encode_with_overflow(
        &self,
        request: &EncodeRequest<'_>,
    ) -> layoutprep_core::Result<Vec<EncodedWindow>> {
        if request.words.is_empty() {
            return Ok(Vec::new());
        }

        let mut tokenizer = self.tokenizer.clone();
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: request.max_length,
                stride: request.stride,
                ..Default::default()
            }))
            .map_err(tokenizer_error)?;
        tokenizer.with_padding(None);

        let encoding = tokenizer
            .encode(request.words, true)
            .map_err(tokenizer_error)?;

        let mut windows = vec![to_window(&encoding, request)];
        windows.extend(
            encoding
                .get_overflowing()
                .iter()
                .map(|e| to_window(e, request)),
        );
        Ok(windows)
    }

    fn pad_token_id(&self) -> u32 {
        self.pad_token_id
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }
}
