//! Dictionary handles.
//!
//! The segmenter only ever sees a [`WordIndex`]: anything that can list the
//! dictionary words starting at a byte offset. [`Dictionary`] wraps one behind an
//! `Arc`, so a loaded word list is built once and shared by every segmenter and
//! thread that holds a clone. The index is read-only once it is wrapped.

use std::fmt;
use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use phf::{Set, phf_set};
use tracing::{debug, error, warn};

use crate::errors::LoadError;
use crate::trie::{Prefixes, Trie};

/// Common Thai function words, used when no word list is given.
///
/// Enough for smoke tests and demos, nowhere near enough for real text.
pub static DEFAULT_WORDS: Set<&'static str> = phf_set! {
    "ไป", "มา", "ใน", "ที่", "และ", "หรือ", "คือ", "เป็น", "มี", "ได้",
    "จะ", "ไม่", "ของ", "กับ", "ก็", "ให้", "ถ้า", "แล้ว", "เมื่อ", "ซึ่ง",
    "นี้", "นั้น", "อยู่", "เพื่อ", "การ", "ความ", "จาก", "โดย", "อย่าง", "ถึง",
    "ว่า", "เอง", "ทุก", "แต่", "ตาม", "นัก", "ยัง", "ผล", "ผู้", "คน",
    "วัน", "ปี", "เดือน", "ครั้ง", "ตัว", "สิ่ง", "งาน", "ข้อ", "รับ",
};

/// Prefix index queried by the segmenter.
pub trait WordIndex: Send + Sync + fmt::Debug {
    /// Byte lengths of every word starting at `offset` in `text`, shortest first.
    fn prefixes_at(&self, text: &[u8], offset: usize) -> Prefixes;

    /// Whether at least one word starts at `offset`.
    #[inline]
    fn has_prefix_at(&self, text: &[u8], offset: usize) -> bool {
        !self.prefixes_at(text, offset).is_empty()
    }

    fn word_count(&self) -> usize;
}

impl WordIndex for Trie {
    #[inline]
    fn prefixes_at(&self, text: &[u8], offset: usize) -> Prefixes {
        Trie::prefixes_at(self, text, offset)
    }

    #[inline]
    fn has_prefix_at(&self, text: &[u8], offset: usize) -> bool {
        Trie::has_prefix_at(self, text, offset)
    }

    #[inline]
    fn word_count(&self) -> usize {
        Trie::word_count(self)
    }
}

/// Where the words of a [`Dictionary`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DictionarySource {
    Builtin,
    File(PathBuf),
    Reader,
    Custom,
}

/// Shareable handle to a loaded word index.
///
/// Cloning is cheap. The index is released when the last clone is dropped.
#[derive(Clone)]
pub struct Dictionary {
    index: Arc<dyn WordIndex>,
    source: DictionarySource,
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("source", &self.source)
            .field("words", &self.index.word_count())
            .finish()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Dictionary {
    /// The built-in word list. Built once per process and shared.
    pub fn builtin() -> Self {
        static BUILTIN: OnceLock<Arc<Trie>> = OnceLock::new();
        let trie = BUILTIN.get_or_init(|| {
            let mut trie = Trie::new();
            for word in DEFAULT_WORDS.iter() {
                if let Err(e) = trie.insert(word) {
                    error!(error = %e, "built-in word list truncated");
                    break;
                }
            }
            debug!(words = trie.word_count(), "built-in dictionary ready");
            Arc::new(trie)
        });
        Self {
            index: trie.clone(),
            source: DictionarySource::Builtin,
        }
    }

    /// Load a word list, falling back to the built-in list.
    ///
    /// `None` selects the built-in list; no default word file is searched for.
    /// A path that cannot be read is logged and also yields the built-in list, so
    /// segmentation stays available with a bad path. Use [`Dictionary::try_load`]
    /// to see the error instead.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        match Self::try_load(path) {
            Ok(dict) => dict,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "falling back to built-in word list");
                Self::builtin()
            }
        }
    }

    /// Load a word list file: UTF-8, one word per line, blank lines ignored.
    ///
    /// # Errors
    ///
    /// [`LoadError::Io`] when the file cannot be read, [`LoadError::Allocation`]
    /// when the trie cannot grow. No partial dictionary is returned.
    pub fn try_load(path: &Path) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|e| LoadError::io(path.display().to_string(), e))?;
        let mut trie = Trie::new();
        let lines = trie.load_bytes(&bytes)?;
        debug!(
            path = %path.display(),
            lines,
            words = trie.word_count(),
            "loaded dictionary"
        );
        Ok(Self {
            index: Arc::new(trie),
            source: DictionarySource::File(path.to_path_buf()),
        })
    }

    /// Read one word per line from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let mut trie = Trie::new();
        let lines = trie.load_lines(reader)?;
        debug!(lines, words = trie.word_count(), "loaded dictionary from reader");
        Ok(Self {
            index: Arc::new(trie),
            source: DictionarySource::Reader,
        })
    }

    pub fn from_words<I, S>(words: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_index(Trie::from_words(words)?))
    }

    /// Wrap any other index structure.
    pub fn from_index<W: WordIndex + 'static>(index: W) -> Self {
        Self {
            index: Arc::new(index),
            source: DictionarySource::Custom,
        }
    }

    #[inline]
    pub fn source(&self) -> &DictionarySource {
        &self.source
    }

    #[inline]
    pub fn index(&self) -> &dyn WordIndex {
        self.index.as_ref()
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.index.word_count()
    }

    #[inline]
    pub fn prefixes_at(&self, text: &[u8], offset: usize) -> Prefixes {
        self.index.prefixes_at(text, offset)
    }

    #[inline]
    pub fn has_prefix_at(&self, text: &[u8], offset: usize) -> bool {
        self.index.has_prefix_at(text, offset)
    }

    /// Whether both handles point at the same loaded index.
    #[inline]
    pub fn same_index(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.index), Arc::as_ptr(&other.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_has_every_default_word() {
        let dict = Dictionary::builtin();
        assert_eq!(dict.word_count(), DEFAULT_WORDS.len());
        assert_eq!(dict.source(), &DictionarySource::Builtin);
        for w in DEFAULT_WORDS.iter() {
            assert_eq!(dict.prefixes_at(w.as_bytes(), 0).last(), Some(&w.len()), "{w}");
        }
    }

    #[test]
    fn builtin_is_shared() {
        assert!(Dictionary::builtin().same_index(&Dictionary::default()));
        let a = Dictionary::from_words(["ไป"]).unwrap();
        let b = Dictionary::from_words(["ไป"]).unwrap();
        assert!(!a.same_index(&b));
        assert!(a.same_index(&a.clone()));
    }

    #[test]
    fn load_none_is_builtin() {
        assert_eq!(Dictionary::load(None).source(), &DictionarySource::Builtin);
    }

    #[test]
    fn load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let dict = Dictionary::load(Some(&missing));
        assert_eq!(dict.source(), &DictionarySource::Builtin);
        assert!(matches!(
            Dictionary::try_load(&missing),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "ฉัน\r\nไป\n\nโรงเรียน\n").unwrap();
        let dict = Dictionary::load(Some(file.path()));
        assert_eq!(dict.word_count(), 3);
        assert_eq!(
            dict.source(),
            &DictionarySource::File(file.path().to_path_buf())
        );
        assert!(dict.has_prefix_at("โรงเรียน".as_bytes(), 0));
    }

    #[test]
    fn from_reader_counts_words() {
        let dict = Dictionary::from_reader("ก\nข\nก\n".as_bytes()).unwrap();
        assert_eq!(dict.word_count(), 2);
        assert_eq!(dict.source(), &DictionarySource::Reader);
    }

    #[derive(Debug)]
    struct EveryByte;

    impl WordIndex for EveryByte {
        fn prefixes_at(&self, text: &[u8], offset: usize) -> Prefixes {
            if offset < text.len() {
                Prefixes::from_slice(&[1])
            } else {
                Prefixes::new()
            }
        }

        fn word_count(&self) -> usize {
            0
        }
    }

    #[test]
    fn custom_index_uses_default_has_prefix() {
        let dict = Dictionary::from_index(EveryByte);
        assert_eq!(dict.source(), &DictionarySource::Custom);
        assert!(dict.has_prefix_at(b"abc", 2));
        assert!(!dict.has_prefix_at(b"abc", 3));
    }
}
