//! Heading pattern matchers
//!
//! Each matcher inspects the cursor without moving it and, on a hit, returns
//! the labels for the run it wants to consume. The scan loop in
//! [`super::SectionLabeler`] applies them in precedence order.

use super::cursor::WordCursor;
use crate::label::LabelId;
use crate::rules::HeadingRules;
use regex::Regex;
use std::sync::OnceLock;

// Canonical numerals 1..=3999; the empty numeral is rejected separately
const ROMAN: &str = r"M{0,3}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3})";

fn roman_heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^({ROMAN})\.$")).expect("static regex"))
}

fn roman_subsection_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^({ROMAN})\.\d+\.$")).expect("static regex"))
}

/// A run claimed by a matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Which matcher produced the run
    pub kind: PatternKind,
    /// Labels for the consumed words, starting at the cursor
    pub labels: Vec<LabelId>,
}

impl PatternMatch {
    /// Number of words consumed
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the run is empty
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Pattern classes in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Literal section vocabulary
    Vocabulary,
    /// `IV.` followed by an upper-case or vocabulary continuation
    RomanHeading,
    /// `II.6.` followed by a title ending in `.`
    RomanSubsection,
}

impl PatternKind {
    /// All kinds, highest precedence first
    pub const PRECEDENCE: [PatternKind; 3] = [
        PatternKind::Vocabulary,
        PatternKind::RomanHeading,
        PatternKind::RomanSubsection,
    ];

    /// Try this matcher at the cursor
    pub fn try_match<S: AsRef<str>>(
        self,
        cursor: &WordCursor<'_, S>,
        rules: &HeadingRules,
    ) -> Option<PatternMatch> {
        match self {
            PatternKind::Vocabulary => match_vocabulary(cursor, rules),
            PatternKind::RomanHeading => match_roman_heading(cursor, rules),
            PatternKind::RomanSubsection => match_roman_subsection(cursor, rules),
        }
    }
}

/// Head word as compared by the matchers: colons and surrounding whitespace stripped
pub fn normalize_head(word: &str) -> &str {
    word.trim_matches(':').trim()
}

/// `I.`, `XIV.`, ... with a non-empty canonical numeral
pub fn is_roman_heading_marker(token: &str) -> bool {
    roman_heading_regex()
        .captures(token)
        .is_some_and(|c| !c[1].is_empty())
}

/// `II.6.`, `IV.12.`, ... with a non-empty canonical numeral
pub fn is_roman_subsection_marker(token: &str) -> bool {
    roman_subsection_regex()
        .captures(token)
        .is_some_and(|c| !c[1].is_empty())
}

/// At least one cased character and no lower-case ones
pub fn is_upper(word: &str) -> bool {
    let mut cased = false;
    for ch in word.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Pattern A: a vocabulary word opens a run of vocabulary words
pub fn match_vocabulary<S: AsRef<str>>(
    cursor: &WordCursor<'_, S>,
    rules: &HeadingRules,
) -> Option<PatternMatch> {
    let head = normalize_head(cursor.peek(0)?).to_lowercase();
    if !rules.is_heading_word(&head) {
        return None;
    }

    let mut labels = vec![LabelId::BeginSection];
    while labels.len() < rules.max_header_len() {
        match cursor.peek(labels.len()) {
            Some(next) if rules.is_heading_word(&next.to_lowercase()) => {
                labels.push(LabelId::InsideSection)
            }
            _ => break,
        }
    }

    Some(PatternMatch {
        kind: PatternKind::Vocabulary,
        labels,
    })
}

/// Pattern B: a Roman marker confirmed by upper-case or vocabulary words
///
/// The marker is only tagged once a continuation confirms it. A marker with
/// no confirming word consumes itself and stays `O`.
pub fn match_roman_heading<S: AsRef<str>>(
    cursor: &WordCursor<'_, S>,
    rules: &HeadingRules,
) -> Option<PatternMatch> {
    if !is_roman_heading_marker(normalize_head(cursor.peek(0)?)) {
        return None;
    }

    let mut labels = vec![LabelId::Outside];
    while labels.len() < rules.max_header_len() {
        let Some(next) = cursor.peek(labels.len()) else {
            break;
        };
        if !is_upper(next) && !rules.is_heading_word(&next.to_lowercase()) {
            break;
        }
        labels[0] = LabelId::BeginSection;
        labels.push(LabelId::InsideSection);
    }

    Some(PatternMatch {
        kind: PatternKind::RomanHeading,
        labels,
    })
}

/// Pattern C: a Roman sub-section marker opens a title that ends at a `.` word
pub fn match_roman_subsection<S: AsRef<str>>(
    cursor: &WordCursor<'_, S>,
    rules: &HeadingRules,
) -> Option<PatternMatch> {
    if !is_roman_subsection_marker(normalize_head(cursor.peek(0)?)) {
        return None;
    }

    let (begin, inside) = if rules.subsection_tags() {
        (LabelId::BeginSubsection, LabelId::InsideSubsection)
    } else {
        (LabelId::BeginSection, LabelId::InsideSection)
    };

    let mut labels = vec![begin];
    while labels.len() < rules.max_header_len() {
        let Some(next) = cursor.peek(labels.len()) else {
            break;
        };
        labels.push(inside);
        if next.ends_with('.') {
            break;
        }
    }

    Some(PatternMatch {
        kind: PatternKind::RomanSubsection,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at<'a>(words: &'a [&'a str]) -> WordCursor<'a, &'a str> {
        WordCursor::new(words)
    }

    #[test]
    fn test_roman_heading_markers() {
        for ok in ["I.", "II.", "IV.", "IX.", "XIV.", "XL.", "MCMXCIV.", "MMMCMXCIX."] {
            assert!(is_roman_heading_marker(ok), "{ok}");
        }
        for bad in [".", "I", "IIII.", "VV.", "IC.", "MMMM.", "iv.", "II.6.", "A."] {
            assert!(!is_roman_heading_marker(bad), "{bad}");
        }
    }

    #[test]
    fn test_roman_subsection_markers() {
        for ok in ["II.6.", "III.1.", "IV.12.", "I.0."] {
            assert!(is_roman_subsection_marker(ok), "{ok}");
        }
        for bad in ["II.6", "II..", ".6.", "II.a.", "2.6.", "II."] {
            assert!(!is_roman_subsection_marker(bad), "{bad}");
        }
    }

    #[test]
    fn test_is_upper() {
        assert!(is_upper("INTRODUCTION"));
        assert!(is_upper("II."));
        assert!(is_upper("A-B"));
        assert!(!is_upper("Introduction"));
        assert!(!is_upper("1."));
        assert!(!is_upper(""));
    }

    #[test]
    fn test_normalize_head() {
        assert_eq!(normalize_head("Abstract:"), "Abstract");
        assert_eq!(normalize_head("::Methods:"), "Methods");
        // Colons are stripped before whitespace, so a trailing space shields one
        assert_eq!(normalize_head("::Methods: "), "Methods:");
        assert_eq!(normalize_head("  I. "), "I.");
    }

    #[test]
    fn test_vocabulary_run() {
        let rules = HeadingRules::default();
        let words = ["Related", "work", "here"];
        let m = match_vocabulary(&at(&words), &rules).unwrap();
        assert_eq!(m.labels, vec![LabelId::BeginSection]);

        let words = ["Conclusions:", "References", "ABSTRACT", "text"];
        let m = match_vocabulary(&at(&words), &rules).unwrap();
        assert_eq!(
            m.labels,
            vec![
                LabelId::BeginSection,
                LabelId::InsideSection,
                LabelId::InsideSection
            ]
        );
    }

    #[test]
    fn test_vocabulary_continuation_keeps_colon() {
        // Only the head word is colon-stripped
        let rules = HeadingRules::default();
        let words = ["Abstract", "Introduction:"];
        let m = match_vocabulary(&at(&words), &rules).unwrap();
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_vocabulary_no_match() {
        let rules = HeadingRules::default();
        assert!(match_vocabulary(&at(&["Results"]), &rules).is_none());
        assert!(match_vocabulary(&at(&[]), &rules).is_none());
    }

    #[test]
    fn test_roman_heading_confirmed() {
        let rules = HeadingRules::default();
        let words = ["III.", "EXPERIMENTAL", "SETUP", "We"];
        let m = match_roman_heading(&at(&words), &rules).unwrap();
        assert_eq!(
            m.labels,
            vec![
                LabelId::BeginSection,
                LabelId::InsideSection,
                LabelId::InsideSection
            ]
        );
    }

    #[test]
    fn test_roman_heading_unconfirmed_stays_outside() {
        let rules = HeadingRules::default();
        let words = ["IV.", "the", "results"];
        let m = match_roman_heading(&at(&words), &rules).unwrap();
        assert_eq!(m.labels, vec![LabelId::Outside]);
    }

    #[test]
    fn test_roman_subsection_stops_at_period() {
        let rules = HeadingRules::default();
        let words = ["II.6.", "Data", "collection.", "We", "gathered"];
        let m = match_roman_subsection(&at(&words), &rules).unwrap();
        assert_eq!(
            m.labels,
            vec![
                LabelId::BeginSubsection,
                LabelId::InsideSubsection,
                LabelId::InsideSubsection
            ]
        );
    }

    #[test]
    fn test_roman_subsection_fallback_tags() {
        let rules = HeadingRules::default().with_subsection_tags(false);
        let words = ["II.6.", "Setup."];
        let m = match_roman_subsection(&at(&words), &rules).unwrap();
        assert_eq!(
            m.labels,
            vec![LabelId::BeginSection, LabelId::InsideSection]
        );
    }

    #[test]
    fn test_roman_subsection_capped() {
        let rules = HeadingRules::default().with_max_header_len(3);
        let words = ["I.2.", "a", "b", "c", "d."];
        let m = match_roman_subsection(&at(&words), &rules).unwrap();
        assert_eq!(m.len(), 3);
    }
}
