//! Section label vocabulary
//!
//! A begin/inside scheme over two heading granularities plus the outside tag.
//! Persisted records carry the numeric ids; positions that do not belong to a
//! word carry [`IGNORE_LABEL_ID`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label id written for padding and special-token positions
pub const IGNORE_LABEL_ID: i64 = -100;

/// Section label attached to every word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LabelId {
    /// Outside any heading
    #[default]
    #[serde(rename = "O")]
    Outside,
    /// First word of a section heading
    #[serde(rename = "B-SEC")]
    BeginSection,
    /// Continuation of a section heading
    #[serde(rename = "I-SEC")]
    InsideSection,
    /// First word of a sub-section heading
    #[serde(rename = "B-SUBSEC")]
    BeginSubsection,
    /// Continuation of a sub-section heading
    #[serde(rename = "I-SUBSEC")]
    InsideSubsection,
}

impl LabelId {
    /// Every label, in id order
    pub const ALL: [LabelId; 5] = [
        LabelId::Outside,
        LabelId::BeginSection,
        LabelId::InsideSection,
        LabelId::BeginSubsection,
        LabelId::InsideSubsection,
    ];

    /// Numeric id used in dataset records
    pub fn id(self) -> u8 {
        match self {
            LabelId::Outside => 0,
            LabelId::BeginSection => 1,
            LabelId::InsideSection => 2,
            LabelId::BeginSubsection => 3,
            LabelId::InsideSubsection => 4,
        }
    }

    /// Inverse of [`LabelId::id`]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Tag string (`O`, `B-SEC`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            LabelId::Outside => "O",
            LabelId::BeginSection => "B-SEC",
            LabelId::InsideSection => "I-SEC",
            LabelId::BeginSubsection => "B-SUBSEC",
            LabelId::InsideSubsection => "I-SUBSEC",
        }
    }

    /// Whether this label marks part of a heading
    pub fn is_heading(self) -> bool {
        self != LabelId::Outside
    }

    /// Whether this label belongs to a sub-section heading
    pub fn is_subsection(self) -> bool {
        matches!(self, LabelId::BeginSubsection | LabelId::InsideSubsection)
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LabelId::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown label '{s}'"))
    }
}

/// Numeric record id for an optional label (`None` is the ignore sentinel)
pub fn record_id(label: Option<LabelId>) -> i64 {
    label.map_or(IGNORE_LABEL_ID, |l| i64::from(l.id()))
}
