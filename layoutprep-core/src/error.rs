//! Core error types (deterministic only)
//!
//! Everything the labeler, the bbox math and the windower can reject. Failures
//! of external collaborators cross this boundary as
//! [`CoreError::ExternalCapability`] and are otherwise opaque.

use thiserror::Error;

/// Core errors (no I/O, no retries)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Zero-area image passed to bbox normalization
    #[error("degenerate image size {width}x{height}")]
    DegenerateImage {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },

    /// Malformed word list handed to the labeler or windower
    #[error("invalid labeling input: {reason}")]
    LabelingInput {
        /// What was wrong with the input
        reason: String,
    },

    /// Tokenizer output that cannot be traced back to the page's words
    #[error("window {window} of page {page_index} is misaligned: {reason}")]
    WindowingAlignment {
        /// Page the window was produced for
        page_index: usize,
        /// Position of the window in the tokenizer output
        window: usize,
        /// What disagreed
        reason: String,
    },

    /// Window length and stride that cannot produce overlapping windows
    #[error("invalid window geometry: max_length {max_length}, stride {stride}")]
    InvalidWindow {
        /// Requested sub-tokens per window
        max_length: usize,
        /// Requested overlap in sub-tokens
        stride: usize,
    },

    /// Failure reported by an external collaborator (tokenizer, OCR, ...)
    #[error("{capability} failed: {message}")]
    ExternalCapability {
        /// Name of the collaborator
        capability: &'static str,
        /// Backend error message, as reported
        message: String,
    },

    /// Heading rules that failed to load or validate
    #[error("invalid heading rules: {reason}")]
    Rules {
        /// Why the rules were rejected
        reason: String,
    },
}

impl CoreError {
    pub(crate) fn alignment(page_index: usize, window: usize, reason: impl Into<String>) -> Self {
        CoreError::WindowingAlignment {
            page_index,
            window,
            reason: reason.into(),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_image_display() {
        let err = CoreError::DegenerateImage {
            width: 0,
            height: 600,
        };
        assert_eq!(err.to_string(), "degenerate image size 0x600");
    }

    #[test]
    fn test_alignment_display() {
        let err = CoreError::alignment(3, 1, "word index 12 out of range");
        assert_eq!(
            err.to_string(),
            "window 1 of page 3 is misaligned: word index 12 out of range"
        );
    }

    #[test]
    fn test_external_display() {
        let err = CoreError::ExternalCapability {
            capability: "tokenizer",
            message: "vocab missing".to_string(),
        };
        assert_eq!(err.to_string(), "tokenizer failed: vocab missing");
    }
}
