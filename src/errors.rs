//! Error types.
//!
//! Loading and segmentation fail independently: a failed segmentation call never
//! touches the dictionary it was reading from.

use std::collections::TryReserveError;

use thiserror::Error;

/// Crate-wide result type, defaulting to [`NewmmError`].
pub type Result<T, E = NewmmError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum NewmmError {
    #[error("dictionary error: {0}")]
    Load(#[from] LoadError),

    #[error("segmentation error: {0}")]
    Segment(#[from] SegmentError),

    #[error("unsupported engine `{0}`, only `newmm` is available")]
    UnknownEngine(String),
}

/// Failure to build a dictionary.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read dictionary source `{source_name}`: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("out of memory while growing the dictionary trie")]
    Allocation,
}

impl LoadError {
    pub(crate) fn io<S: Into<String>>(source_name: S, source: std::io::Error) -> Self {
        Self::Io {
            source_name: source_name.into(),
            source,
        }
    }
}

impl From<TryReserveError> for LoadError {
    fn from(_: TryReserveError) -> Self {
        Self::Allocation
    }
}

impl From<smallvec::CollectionAllocErr> for LoadError {
    fn from(_: smallvec::CollectionAllocErr) -> Self {
        Self::Allocation
    }
}

/// Failure of a single segmentation call.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// The configured token ceiling was reached before the end of the text.
    /// `consumed` is the byte offset segmentation had reached.
    #[error("token limit of {limit} reached after {consumed} of {len} bytes")]
    TokenLimit {
        limit: usize,
        consumed: usize,
        len: usize,
    },

    #[error("out of memory while growing the token buffer")]
    Allocation(#[from] TryReserveError),
}
