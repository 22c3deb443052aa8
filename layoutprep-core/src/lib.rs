//! Section-heading labeling and token windowing for document-layout datasets
//!
//! This crate holds the deterministic part of the pipeline: the page model,
//! bounding-box normalization into the `0..=1000` space, a rule-based
//! section labeler and a windower that cuts a labeled page into fixed-length
//! overlapping sub-token chunks.
//!
//! # Example
//!
//! ```rust
//! use layoutprep_core::{
//!     normalize, ChunkWindower, ImageSize, LabelId, Page, PieceTokenizer, PixelBox,
//!     SectionLabeler, Word,
//! };
//!
//! let size = ImageSize::new(800, 1000);
//! let words = [("Abstract", 40), ("We", 120), ("study", 160)]
//!     .into_iter()
//!     .map(|(text, left)| {
//!         let px = PixelBox::new(left, 50, 60, 20);
//!         let norm = normalize(left, 50, 60, 20, size.width, size.height).unwrap();
//!         Word::new(text, px, norm, 96.0)
//!     })
//!     .collect();
//! let mut page = Page::new("paper", 0, "paper/page-1.png", size, words);
//!
//! SectionLabeler::default().label_page(&mut page);
//! assert_eq!(page.words[0].label, LabelId::BeginSection);
//!
//! let chunks = ChunkWindower::new(16, 4)
//!     .unwrap()
//!     .window_page(&page, &PieceTokenizer::default())
//!     .unwrap();
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].len(), 16);
//! ```

pub mod bbox;
pub mod error;
pub mod label;
pub mod labeler;
pub mod rules;
pub mod types;
pub mod window;

pub use bbox::{normalize, ImageSize, NormBox, PixelBox, NORM_SCALE};
pub use error::{CoreError, Result};
pub use label::{record_id, LabelId, IGNORE_LABEL_ID};
pub use labeler::{PatternKind, PatternMatch, SectionLabeler, WordCursor};
pub use rules::{HeadingRules, HeadingRulesConfig, DEFAULT_VOCABULARY, MAX_HEADER_LEN};
pub use types::{Chunk, Page, SubToken, Word};
pub use window::{
    ChunkWindower, EncodeRequest, EncodedWindow, OverflowTokenizer, PageMeta, PieceTokenizer,
    DEFAULT_MAX_LENGTH, DEFAULT_STRIDE,
};
