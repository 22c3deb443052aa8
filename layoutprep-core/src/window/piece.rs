//! Vocabulary-free reference tokenizer
//!
//! Splits words into fixed-width character pieces and hashes each piece into a
//! fixed id range. Window framing and overflow follow the HuggingFace
//! truncation-with-stride behaviour (`<s> … </s>` plus padding), so dry runs
//! produce the same window layout a real processor would.

use super::encoding::{EncodeRequest, EncodedWindow, OverflowTokenizer};
use super::overflow::overflow_ranges;
use crate::bbox::NormBox;
use crate::error::{CoreError, Result};

/// Start-of-window id
pub const CLS_TOKEN_ID: u32 = 0;
/// Padding id
pub const PAD_TOKEN_ID: u32 = 1;
/// End-of-window id
pub const SEP_TOKEN_ID: u32 = 2;

const FIRST_PIECE_ID: u32 = 4;
const SPECIAL_TOKENS_PER_WINDOW: usize = 2;

/// Character-piece tokenizer
#[derive(Debug, Clone)]
pub struct PieceTokenizer {
    piece_chars: usize,
    vocab_size: u32,
}

impl Default for PieceTokenizer {
    fn default() -> Self {
        Self {
            piece_chars: 4,
            vocab_size: 50_265,
        }
    }
}

impl PieceTokenizer {
    /// Tokenizer with the given piece width and id range
    pub fn new(piece_chars: usize, vocab_size: u32) -> Self {
        Self {
            piece_chars: piece_chars.max(1),
            vocab_size: vocab_size.max(FIRST_PIECE_ID + 1),
        }
    }

    /// Pieces of one word: `["docu", "##ment"]`
    pub fn pieces(&self, word: &str) -> Vec<String> {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            // Blank OCR words still occupy one position
            return vec![String::new()];
        }
        chars
            .chunks(self.piece_chars)
            .enumerate()
            .map(|(i, piece)| {
                let text: String = piece.iter().collect();
                if i == 0 {
                    text
                } else {
                    format!("##{text}")
                }
            })
            .collect()
    }

    /// Stable id of a piece
    pub fn piece_id(&self, piece: &str) -> u32 {
        FIRST_PIECE_ID + fnv1a(piece.as_bytes()) % (self.vocab_size - FIRST_PIECE_ID)
    }

    /// `(token id, word index)` for every piece of every word
    fn sub_tokens(&self, words: &[&str]) -> Vec<(u32, usize)> {
        words
            .iter()
            .enumerate()
            .flat_map(|(word_index, word)| {
                self.pieces(word)
                    .into_iter()
                    .map(move |piece| (piece, word_index))
            })
            .map(|(piece, word_index)| (self.piece_id(&piece), word_index))
            .collect()
    }
}

impl OverflowTokenizer for PieceTokenizer {
    fn encode_with_overflow(&self, request: &EncodeRequest<'_>) -> Result<Vec<EncodedWindow>> {
        let content = request
            .max_length
            .checked_sub(SPECIAL_TOKENS_PER_WINDOW)
            .filter(|c| *c > request.stride)
            .ok_or(CoreError::InvalidWindow {
                max_length: request.max_length,
                stride: request.stride,
            })?;

        let tokens = self.sub_tokens(request.words);
        let ranges = overflow_ranges(tokens.len(), content, request.stride)?;

        let windows = ranges
            .into_iter()
            .map(|range| {
                let mut window = EncodedWindow::default();
                push_special(&mut window, CLS_TOKEN_ID, 1);
                for &(id, word_index) in &tokens[range] {
                    window.input_ids.push(id);
                    window.attention_mask.push(1);
                    window.word_ids.push(Some(word_index));
                    window.boxes.push(request.boxes[word_index]);
                    window.labels.push(Some(request.labels[word_index]));
                }
                push_special(&mut window, SEP_TOKEN_ID, 1);
                while window.input_ids.len() < request.max_length {
                    push_special(&mut window, PAD_TOKEN_ID, 0);
                }
                window
            })
            .collect();

        Ok(windows)
    }

    fn pad_token_id(&self) -> u32 {
        PAD_TOKEN_ID
    }

    fn name(&self) -> &'static str {
        "piece"
    }
}

fn push_special(window: &mut EncodedWindow, id: u32, attention: u8) {
    window.input_ids.push(id);
    window.attention_mask.push(attention);
    window.word_ids.push(None);
    window.boxes.push(NormBox::ZERO);
    window.labels.push(None);
}

fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for b in bytes {
        hash ^= u32::from(*b);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
