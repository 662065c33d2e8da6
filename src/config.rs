//! Segmentation settings.

/// Historical hard cap on the number of tokens produced by one call.
pub const DEFAULT_MAX_TOKENS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentConfig {
    /// Upper bound on tokens per call. Reaching it fails the call with
    /// [`SegmentError::TokenLimit`](crate::errors::SegmentError::TokenLimit);
    /// the remaining text is never dropped silently. `None` means unbounded.
    pub max_tokens: Option<usize>,

    /// Emit whitespace runs as tokens. When `false`, space and tab runs are
    /// consumed but left out of the result and do not count toward `max_tokens`.
    pub keep_whitespace: bool,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

// ------------------------------------------------------------------------
// Presets
// ------------------------------------------------------------------------

/// Whitespace kept, 10 000 token ceiling.
pub const DEFAULT_CONFIG: SegmentConfig = SegmentConfig {
    max_tokens: Some(DEFAULT_MAX_TOKENS),
    keep_whitespace: true,
};

/// Whitespace kept, no ceiling.
pub const UNBOUNDED: SegmentConfig = SegmentConfig {
    max_tokens: None,
    keep_whitespace: true,
};

/// Whitespace runs dropped, 10 000 token ceiling.
pub const DROP_WHITESPACE: SegmentConfig = SegmentConfig {
    max_tokens: Some(DEFAULT_MAX_TOKENS),
    keep_whitespace: false,
};
