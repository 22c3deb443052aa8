//! Labeler and windower working together on realistic pages

use layoutprep_core::{
    normalize, ChunkWindower, HeadingRules, ImageSize, LabelId, Page, PieceTokenizer, PixelBox,
    SectionLabeler, Word, IGNORE_LABEL_ID,
};
use std::io::Write;
use LabelId::*;

/// Lay words out left to right, 12 per line
fn build_page(texts: &[&str]) -> Page {
    let size = ImageSize::new(1240, 1754);
    let words = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let left = 60 + (i % 12) as i32 * 95;
            let top = 80 + (i / 12) as i32 * 30;
            let norm = normalize(left, top, 90, 24, size.width, size.height).unwrap();
            Word::new(*text, PixelBox::new(left, top, 90, 24), norm, 91.0)
        })
        .collect();
    Page::new("paper-7", 3, "paper-7/page-004.png", size, words)
}

#[test]
fn test_related_work_heading() {
    let words = ["II.", "Related", "Work", "This", "section", "reviews", "prior", "approaches"];
    assert_eq!(
        SectionLabeler::default().label(&words),
        vec![BeginSection, InsideSection, Outside, Outside, Outside, Outside, Outside, Outside]
    );
}

#[test]
fn test_lone_marker_followed_by_prose() {
    let words = ["VII.", "we", "then", "evaluate"];
    assert_eq!(
        SectionLabeler::default().label(&words),
        vec![Outside, Outside, Outside, Outside]
    );
}

#[test]
fn test_custom_rules_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[metadata]
name = "german"

[vocabulary]
words = ["Einleitung", "Zusammenfassung", "Literatur"]

[limits]
max_header_len = 4

[labels]
subsection_tags = false
"#
    )
    .unwrap();

    let rules = HeadingRules::from_file(file.path()).unwrap();
    assert_eq!(rules.name(), "german");

    let labeler = SectionLabeler::new(rules);
    let words = ["Einleitung:", "Dokumente", "II.3.", "Aufbau.", "Text"];
    assert_eq!(
        labeler.label(&words),
        vec![BeginSection, Outside, BeginSection, InsideSection, Outside]
    );
}

#[test]
fn test_long_page_end_to_end() {
    let mut texts = vec!["Abstract"];
    texts.extend(std::iter::repeat("token").take(200));
    texts.extend(["III.", "METHODS"]);
    texts.extend(std::iter::repeat("more").take(200));
    let mut page = build_page(&texts);

    SectionLabeler::default().label_page(&mut page);
    assert_eq!(page.words[0].label, BeginSection);
    assert_eq!(page.words[201].label, BeginSection);
    assert_eq!(page.words[202].label, InsideSection);

    let chunks = ChunkWindower::new(64, 16)
        .unwrap()
        .window_page(&page, &PieceTokenizer::default())
        .unwrap();
    assert!(chunks.len() > 1);

    let mut seen_heading = false;
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.chunk_index, i);
        assert_eq!(chunk.page_index, 3);
        assert_eq!(chunk.len(), 64);
        assert_eq!(chunk.label_ids()[0], IGNORE_LABEL_ID);

        for t in chunk.sub_tokens.iter().filter(|t| t.source_word_index == Some(202)) {
            seen_heading = true;
            assert_eq!(t.label, Some(InsideSection));
            assert_eq!(t.bbox_norm, page.words[202].bbox_norm);
        }
    }
    assert!(seen_heading);
}
