//! Thai word segmentation by dictionary maximal matching, constrained by Thai
//! Character Cluster boundaries.
//!
//! ```
//! use thai_newmm::{Dictionary, Segmenter};
//!
//! let dict = Dictionary::from_words(["ฉัน", "ไป", "โรงเรียน"]).unwrap();
//! let segmenter = Segmenter::new(dict);
//! assert_eq!(
//!     segmenter.segment_str("ฉันไปโรงเรียน").unwrap(),
//!     ["ฉัน", "ไป", "โรงเรียน"]
//! );
//! ```
pub mod cache;
pub mod config;
pub mod dictionary;
pub mod errors;
pub mod segmenter;
pub mod tcc;
pub mod tokenize;
pub mod trie;
pub mod unicode;

pub use cache::{CacheKey, DictionaryCache};
pub use config::{DEFAULT_CONFIG, DROP_WHITESPACE, SegmentConfig, UNBOUNDED};
pub use dictionary::{DEFAULT_WORDS, Dictionary, DictionarySource, WordIndex};
pub use errors::{LoadError, NewmmError, Result, SegmentError};
pub use segmenter::{Segmenter, SegmenterBuilder, Span, Token, TokenKind};
pub use tokenize::{Engine, segment, segment_with, word_tokenize};
pub use trie::Trie;
