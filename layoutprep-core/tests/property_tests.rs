//! Property-based tests
//!
//! Invariants of the bbox math, the labeler and the windower over generated
//! input.

use layoutprep_core::{
    normalize, ChunkWindower, HeadingRules, ImageSize, LabelId, NormBox, Page, PieceTokenizer,
    PixelBox, SectionLabeler, Word, DEFAULT_VOCABULARY,
};
use proptest::prelude::*;

fn arb_label() -> impl Strategy<Value = LabelId> {
    prop::sample::select(LabelId::ALL.to_vec())
}

fn arb_page(max_words: usize) -> impl Strategy<Value = Page> {
    prop::collection::vec(
        ("[A-Za-z0-9.:]{0,14}", arb_label(), 0u16..=1000, 0u16..=1000),
        0..max_words,
    )
    .prop_map(|entries| {
        let words = entries
            .into_iter()
            .map(|(text, label, x, y)| {
                let mut w = Word::new(text, PixelBox::new(0, 0, 1, 1), NormBox::new(x, y, 1000, 1000), 80.0);
                w.label = label;
                w
            })
            .collect();
        Page::new("prop", 0, "prop.png", ImageSize::new(1000, 1000), words)
    })
}

/// Words that look like headings to nobody: lower-case letters, no vocabulary
fn arb_plain_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        "[a-z]{1,10}".prop_filter("vocabulary word", |w| !DEFAULT_VOCABULARY.contains(&w.as_str())),
        0..200,
    )
}

/// Heading-heavy word soup
fn arb_heading_soup() -> impl Strategy<Value = Vec<String>> {
    let token = prop_oneof![
        prop::sample::select(vec!["I.", "II.", "IV.", "XII.", "II.6.", "III.2."]).prop_map(String::from),
        prop::sample::select(DEFAULT_VOCABULARY.to_vec()).prop_map(String::from),
        "[A-Z]{1,8}",
        "[a-z]{1,8}\\.?",
    ];
    prop::collection::vec(token, 0..300)
}

// ============================================================================
// BBox normalization
// ============================================================================

#[test]
fn proptest_normalized_box_is_bounded() {
    proptest!(|(
        left in -5000i32..20000,
        top in -5000i32..20000,
        width in 0i32..20000,
        height in 0i32..20000,
        img_w in 1u32..20000,
        img_h in 1u32..20000,
    )| {
        let b = normalize(left, top, width, height, img_w, img_h).unwrap();
        prop_assert!(b.is_well_formed());
        prop_assert!(b.x1 <= 1000 && b.y1 <= 1000);
        prop_assert!(b.x0 <= b.x1 && b.y0 <= b.y1);
    });
}

// ============================================================================
// Labeler
// ============================================================================

#[test]
fn proptest_runs_respect_max_header_len() {
    proptest!(|(words in arb_heading_soup(), cap in 1usize..20)| {
        let labeler = SectionLabeler::new(HeadingRules::default().with_max_header_len(cap));
        let labels = labeler.label(&words);
        prop_assert_eq!(labels.len(), words.len());

        let mut run = 0usize;
        for label in &labels {
            run = match label {
                LabelId::BeginSection | LabelId::BeginSubsection => 1,
                LabelId::InsideSection | LabelId::InsideSubsection => {
                    prop_assert!(run > 0, "inside label without a run: {:?}", labels);
                    run + 1
                }
                LabelId::Outside => 0,
            };
            prop_assert!(run <= cap, "run of {} over cap {}", run, cap);
        }
    });
}

#[test]
fn proptest_plain_text_is_all_outside() {
    proptest!(|(words in arb_plain_words())| {
        let labels = SectionLabeler::default().label(&words);
        prop_assert_eq!(labels.len(), words.len());
        prop_assert!(labels.iter().all(|l| *l == LabelId::Outside));
    });
}

#[test]
fn proptest_labeler_never_panics() {
    proptest!(|(words in prop::collection::vec("\\PC{0,12}", 0..100))| {
        let labels = SectionLabeler::default().label(&words);
        prop_assert_eq!(labels.len(), words.len());
    });
}

// ============================================================================
// Windower
// ============================================================================

#[test]
fn proptest_windows_cover_content_with_exact_overlap() {
    proptest!(|(page in arb_page(120), max_length in 6usize..40, stride_seed in 0usize..100)| {
        let content = max_length - 2;
        let stride = stride_seed % content;
        let tokenizer = PieceTokenizer::default();
        let chunks = ChunkWindower::new(max_length, stride)
            .unwrap()
            .window_page(&page, &tokenizer)
            .unwrap();

        // Word index of every content sub-token, in page order
        let expected: Vec<usize> = page
            .words
            .iter()
            .enumerate()
            .flat_map(|(i, w)| std::iter::repeat(i).take(tokenizer.pieces(&w.text).len()))
            .collect();

        if expected.is_empty() {
            prop_assert!(chunks.is_empty());
        } else {
            let step = content - stride;
            for (k, chunk) in chunks.iter().enumerate() {
                let got: Vec<usize> =
                    chunk.sub_tokens.iter().filter_map(|t| t.source_word_index).collect();
                let start = k * step;
                let end = (start + content).min(expected.len());
                prop_assert_eq!(&got[..], &expected[start..end]);
            }

            // The last window ends exactly at the last content sub-token
            let last_start = (chunks.len() - 1) * step;
            let last_len = chunks
                .last()
                .map(|c| c.sub_tokens.iter().filter(|t| t.source_word_index.is_some()).count())
                .unwrap_or(0);
            prop_assert_eq!(last_start + last_len, expected.len());
        }
    });
}

#[test]
fn proptest_sub_tokens_agree_with_source_words() {
    proptest!(|(page in arb_page(80), max_length in 4usize..32)| {
        let stride = (max_length - 2) / 2;
        let chunks = ChunkWindower::new(max_length, stride)
            .unwrap()
            .window_page(&page, &PieceTokenizer::default())
            .unwrap();

        for chunk in &chunks {
            prop_assert_eq!(chunk.sub_tokens.len(), max_length);
            for t in &chunk.sub_tokens {
                if t.attention == 0 {
                    prop_assert_eq!(t.source_word_index, None);
                }
                if let Some(i) = t.source_word_index {
                    prop_assert_eq!(t.label, Some(page.words[i].label));
                    prop_assert_eq!(t.bbox_norm, page.words[i].bbox_norm);
                }
            }
        }
    });
}
