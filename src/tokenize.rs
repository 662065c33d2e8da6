//! One-call entry points for callers that do not keep a [`Segmenter`] around.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::dictionary::Dictionary;
use crate::errors::{NewmmError, Result, SegmentError};
use crate::segmenter::Segmenter;

/// Segmentation engine selector, for hosts that pass engines by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    Newmm,
}

impl Engine {
    pub const fn name(self) -> &'static str {
        match self {
            Engine::Newmm => "newmm",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = NewmmError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "newmm" => Ok(Engine::Newmm),
            other => Err(NewmmError::UnknownEngine(other.to_owned())),
        }
    }
}

/// Segment `text` with an already loaded dictionary and default settings.
pub fn segment<'a>(text: &'a str, dict: &Dictionary) -> Result<Vec<&'a str>, SegmentError> {
    Segmenter::new(dict.clone()).segment_str(text)
}

/// Load a dictionary, segment, release the dictionary.
///
/// Convenient for a single call, wasteful for many: every call rebuilds the
/// word index. An unreadable `dict_path` falls back to the built-in list.
pub fn segment_with<'a>(
    text: &'a str,
    dict_path: Option<&Path>,
) -> Result<Vec<&'a str>, SegmentError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let dict = Dictionary::load(dict_path);
    segment(text, &dict)
}

/// Host-binding style entry point: engine by name, strict custom dictionary.
///
/// Unlike [`segment_with`], a `custom_dict` that cannot be read is an error.
pub fn word_tokenize<'a>(
    text: &'a str,
    engine: &str,
    custom_dict: Option<&Path>,
) -> Result<Vec<&'a str>> {
    let Engine::Newmm = engine.parse::<Engine>()?;
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let dict = match custom_dict {
        Some(path) => Dictionary::try_load(path)?,
        None => Dictionary::builtin(),
    };
    Ok(segment(text, &dict)?)
}
