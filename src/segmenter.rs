//! Maximal-matching segmentation engine.
//!
//! The text is walked left to right. At each position:
//!
//! 1. The longest dictionary word starting there is taken, unless it would
//!    strand the following Thai text (no word starts right after it) while a
//!    shorter candidate keeps the dictionary trail alive. The first such shorter
//!    candidate wins.
//! 2. Without a dictionary word, a non-Thai codepoint starts a run of its class
//!    (letters, digits with `.`/`,`, spaces/tabs) and the whole run is one token.
//! 3. Otherwise the token runs to the next Thai Character Cluster boundary, so
//!    unknown Thai text is never split inside a cluster.
//!
//! Tokens are contiguous, never empty, and concatenate back to the input.

use std::ops::Range;

use tracing::trace;

use crate::config::SegmentConfig;
use crate::dictionary::Dictionary;
use crate::errors::SegmentError;
use crate::tcc;
use crate::trie::Prefixes;
use crate::unicode::{RunClass, codepoints, decode_at, is_non_thai, run_class};

/// How a token was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A dictionary word.
    Dictionary,
    /// Run of ASCII letters.
    Latin,
    /// Run of ASCII digits, `.` and `,`.
    Number,
    /// Run of spaces and tabs.
    Whitespace,
    /// Any other single non-Thai codepoint.
    Symbol,
    /// Unknown Thai text up to the next cluster boundary.
    Cluster,
}

impl TokenKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::Dictionary => "dict",
            TokenKind::Latin => "latin",
            TokenKind::Number => "number",
            TokenKind::Whitespace => "space",
            TokenKind::Symbol => "symbol",
            TokenKind::Cluster => "cluster",
        }
    }

    const fn of_run(class: RunClass) -> Self {
        match class {
            RunClass::Letter => TokenKind::Latin,
            RunClass::Digit => TokenKind::Number,
            RunClass::Space => TokenKind::Whitespace,
            RunClass::Other => TokenKind::Symbol,
        }
    }
}

/// Byte range of one token in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub range: Range<usize>,
    pub kind: TokenKind,
}

/// One segmented word, borrowed from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    surface: &'a str,
    start: usize,
    kind: TokenKind,
}

impl<'a> Token<'a> {
    #[inline(always)]
    pub fn surface(&self) -> &'a str {
        self.surface
    }

    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        self.start..self.start + self.surface.len()
    }

    #[inline(always)]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }
}

/// Segmenter bound to one dictionary and one configuration.
///
/// Cheap to clone and safe to share between threads: the dictionary is
/// read-only and every call allocates its own result.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    dict: Dictionary,
    config: SegmentConfig,
}

impl Segmenter {
    pub fn new(dict: Dictionary) -> Self {
        Self {
            dict,
            config: SegmentConfig::default(),
        }
    }

    pub fn builder() -> SegmenterBuilder {
        SegmenterBuilder::default()
    }

    #[inline]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    #[inline]
    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Segment `text` into tokens.
    ///
    /// # Errors
    ///
    /// [`SegmentError::TokenLimit`] when the configured ceiling is reached before
    /// the end of the text, [`SegmentError::Allocation`] when the result cannot
    /// grow. The dictionary is unaffected either way.
    pub fn segment<'a>(&self, text: &'a str) -> Result<Vec<Token<'a>>, SegmentError> {
        let spans = self.spans(text.as_bytes())?;
        let mut tokens = Vec::new();
        tokens.try_reserve_exact(spans.len())?;
        tokens.extend(spans.into_iter().map(|span| Token {
            surface: &text[span.range.clone()],
            start: span.range.start,
            kind: span.kind,
        }));
        Ok(tokens)
    }

    /// Like [`Segmenter::segment`], surfaces only.
    pub fn segment_str<'a>(&self, text: &'a str) -> Result<Vec<&'a str>, SegmentError> {
        Ok(self.segment(text)?.into_iter().map(|t| t.surface).collect())
    }

    /// Segment raw bytes. Malformed UTF-8 is decoded leniently, never rejected.
    pub fn segment_bytes<'a>(&self, text: &'a [u8]) -> Result<Vec<&'a [u8]>, SegmentError> {
        Ok(self
            .spans(text)?
            .into_iter()
            .map(|span| &text[span.range])
            .collect())
    }

    /// The engine: byte ranges and kinds of every token in `text`.
    pub fn spans(&self, text: &[u8]) -> Result<Vec<Span>, SegmentError> {
        let mut out: Vec<Span> = Vec::new();
        if text.is_empty() {
            return Ok(out);
        }

        let len = text.len();
        let clusters = tcc::boundaries(text);
        let mut pos = 0;

        while pos < len {
            let (end, kind) = self.next_token(text, pos, &clusters);

            if kind != TokenKind::Whitespace || self.config.keep_whitespace {
                if let Some(limit) = self.config.max_tokens
                    && out.len() >= limit
                {
                    return Err(SegmentError::TokenLimit {
                        limit,
                        consumed: pos,
                        len,
                    });
                }
                out.try_reserve(1)?;
                out.push(Span {
                    range: pos..end,
                    kind,
                });
            }
            pos = end;
        }

        trace!(bytes = len, tokens = out.len(), "segmented");
        Ok(out)
    }

    // End offset and kind of the token starting at `pos`. Always `> pos`.
    fn next_token(&self, text: &[u8], pos: usize, clusters: &[usize]) -> (usize, TokenKind) {
        if let Some(len) = self.dictionary_match(text, pos) {
            return (pos + len, TokenKind::Dictionary);
        }

        let (cp, cp_len) = decode_at(text, pos);
        if is_non_thai(cp) {
            let class = run_class(cp);
            let mut end = pos + cp_len;
            for (at, next, next_len) in codepoints(text, end) {
                if !class.continues_with(next) {
                    break;
                }
                end = at + next_len;
            }
            return (end, TokenKind::of_run(class));
        }

        (tcc::next_boundary(clusters, pos, text.len()), TokenKind::Cluster)
    }

    // Length of the dictionary word to take at `pos`, if any.
    fn dictionary_match(&self, text: &[u8], pos: usize) -> Option<usize> {
        let remaining = text.len() - pos;
        let candidates: Prefixes = self
            .dict
            .prefixes_at(text, pos)
            .into_iter()
            .filter(|&l| l > 0 && l <= remaining && starts_codepoint(text, pos + l))
            .collect();
        let best = candidates.iter().copied().max()?;

        let end = pos + best;
        if end >= text.len() || self.dict.has_prefix_at(text, end) {
            return Some(best);
        }
        let (next, _) = decode_at(text, end);
        if is_non_thai(next) {
            return Some(best);
        }

        // The greedy choice strands a Thai character. Prefer the first shorter
        // word after which the dictionary still matches.
        let shorter = candidates
            .iter()
            .copied()
            .filter(|&l| l < best)
            .find(|&l| self.dict.has_prefix_at(text, pos + l));
        Some(shorter.unwrap_or(best))
    }
}

// `at` is the end of `text` or the first byte of a sequence, never a continuation byte.
#[inline(always)]
fn starts_codepoint(text: &[u8], at: usize) -> bool {
    text.get(at).is_none_or(|&b| b & 0xC0 != 0x80)
}

#[derive(Debug, Default)]
pub struct SegmenterBuilder {
    dict: Option<Dictionary>,
    config: SegmentConfig,
}

impl SegmenterBuilder {
    pub fn dictionary(mut self, dict: Dictionary) -> Self {
        self.dict = Some(dict);
        self
    }

    pub fn config(mut self, config: SegmentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_tokens(mut self, limit: Option<usize>) -> Self {
        self.config.max_tokens = limit;
        self
    }

    pub fn keep_whitespace(mut self, keep: bool) -> Self {
        self.config.keep_whitespace = keep;
        self
    }

    /// Missing dictionary means the built-in word list.
    pub fn build(self) -> Segmenter {
        Segmenter {
            dict: self.dict.unwrap_or_default(),
            config: self.config,
        }
    }
}
