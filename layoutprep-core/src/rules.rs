//! Heading rules
//!
//! The labeler's vocabulary and limits, loadable from TOML:
//!
//! ```toml
//! [metadata]
//! name = "default"
//!
//! [vocabulary]
//! words = ["abstract", "introduction", "references"]
//!
//! [limits]
//! max_header_len = 15
//!
//! [labels]
//! subsection_tags = true
//! ```

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Hard cutoff that keeps a heading run from swallowing a paragraph
pub const MAX_HEADER_LEN: usize = 15;

/// Section words recognized out of the box
pub const DEFAULT_VOCABULARY: [&str; 8] = [
    "abstract",
    "introduction",
    "related",
    "methods",
    "conclusion",
    "conclusions",
    "references",
    "acknowledgments",
];

/// Serialized form of [`HeadingRules`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingRulesConfig {
    /// Descriptive metadata
    pub metadata: RulesMetadata,
    /// Known section words
    pub vocabulary: VocabularyConfig,
    /// Run-length limits
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Label set options
    #[serde(default)]
    pub labels: LabelsConfig,
}

/// Rules metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesMetadata {
    /// Display name of the rule set
    pub name: String,
}

/// Section vocabulary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Words matched case-insensitively
    pub words: Vec<String>,
}

/// Run-length limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum words in one labeled heading run
    #[serde(default = "default_max_header_len")]
    pub max_header_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_header_len: MAX_HEADER_LEN,
        }
    }
}

/// Label set options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelsConfig {
    /// Emit `B-SUBSEC`/`I-SUBSEC`; when false sub-sections fall back to the section tags
    #[serde(default = "default_true")]
    pub subsection_tags: bool,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            subsection_tags: true,
        }
    }
}

fn default_max_header_len() -> usize {
    MAX_HEADER_LEN
}

fn default_true() -> bool {
    true
}

impl Default for HeadingRulesConfig {
    fn default() -> Self {
        Self {
            metadata: RulesMetadata {
                name: "default".to_string(),
            },
            vocabulary: VocabularyConfig {
                words: DEFAULT_VOCABULARY.iter().map(|w| w.to_string()).collect(),
            },
            limits: LimitsConfig::default(),
            labels: LabelsConfig::default(),
        }
    }
}

impl HeadingRulesConfig {
    /// Check the configuration for values the labeler cannot use
    pub fn validate(&self) -> Result<()> {
        if self.metadata.name.trim().is_empty() {
            return Err(rules_error("metadata.name must not be empty"));
        }
        if self.limits.max_header_len == 0 {
            return Err(rules_error("limits.max_header_len must be at least 1"));
        }
        if let Some(pos) = self.vocabulary.words.iter().position(|w| w.trim().is_empty()) {
            return Err(rules_error(format!("vocabulary.words[{pos}] is empty")));
        }
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| rules_error(format!("failed to render TOML: {e}")))
    }
}

fn rules_error(reason: impl Into<String>) -> CoreError {
    CoreError::Rules {
        reason: reason.into(),
    }
}

/// Compiled heading rules used by the labeler
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingRules {
    name: String,
    vocabulary: HashSet<String>,
    max_header_len: usize,
    subsection_tags: bool,
}

impl Default for HeadingRules {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            vocabulary: DEFAULT_VOCABULARY.iter().map(|w| w.to_string()).collect(),
            max_header_len: MAX_HEADER_LEN,
            subsection_tags: true,
        }
    }
}

impl HeadingRules {
    /// Compile a validated configuration
    pub fn from_config(config: &HeadingRulesConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            name: config.metadata.name.clone(),
            vocabulary: config
                .vocabulary
                .words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .collect(),
            max_header_len: config.limits.max_header_len,
            subsection_tags: config.labels.subsection_tags,
        })
    }

    /// Parse and compile rules from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: HeadingRulesConfig = toml::from_str(content)
            .map_err(|e| rules_error(format!("failed to parse TOML: {e}")))?;
        Self::from_config(&config)
    }

    /// Load rules from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| rules_error(format!("failed to read '{}': {e}", path.display())))?;
        Self::from_toml_str(&content).map_err(|e| match e {
            CoreError::Rules { reason } => rules_error(format!("{}: {reason}", path.display())),
            other => other,
        })
    }

    /// Replace the run cap
    pub fn with_max_header_len(mut self, max_header_len: usize) -> Self {
        self.max_header_len = max_header_len.max(1);
        self
    }

    /// Enable or disable the sub-section tags
    pub fn with_subsection_tags(mut self, enabled: bool) -> Self {
        self.subsection_tags = enabled;
        self
    }

    /// Add a word to the vocabulary
    pub fn with_word(mut self, word: &str) -> Self {
        self.vocabulary.insert(word.trim().to_lowercase());
        self
    }

    /// Rule set name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an already lower-cased word is a known section word
    pub fn is_heading_word(&self, lowered: &str) -> bool {
        self.vocabulary.contains(lowered)
    }

    /// Maximum words in one heading run
    pub fn max_header_len(&self) -> usize {
        self.max_header_len
    }

    /// Whether sub-section tags are emitted
    pub fn subsection_tags(&self) -> bool {
        self.subsection_tags
    }

    /// Vocabulary size
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}
