//! Caller-owned cache of loaded dictionaries.
//!
//! Loading a word list is far more expensive than segmenting a sentence, so
//! callers that accept a dictionary path per request keep one of these around.
//! Entries are keyed by the resolved identity of the source and stay until they
//! are removed or the cache is cleared.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dictionary::{Dictionary, DictionarySource};
use crate::errors::LoadError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Builtin,
    File(PathBuf),
}

impl CacheKey {
    /// Resolve `path` to its canonical form so that different spellings of the
    /// same file share an entry. Paths that cannot be resolved are kept as given.
    pub fn resolve(path: Option<&Path>) -> Self {
        match path {
            None => Self::Builtin,
            Some(p) => Self::File(p.canonicalize().unwrap_or_else(|_| p.to_path_buf())),
        }
    }
}

#[derive(Debug, Default)]
pub struct DictionaryCache {
    entries: HashMap<CacheKey, Dictionary>,
}

impl DictionaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached dictionary for `path`, loading it on first use.
    ///
    /// Follows [`Dictionary::load`]: an unreadable path yields the built-in list.
    /// The fallback is cached under the requested key as well.
    pub fn get_or_load(&mut self, path: Option<&Path>) -> Dictionary {
        let key = CacheKey::resolve(path);
        if let Some(dict) = self.entries.get(&key) {
            return dict.clone();
        }
        let dict = Dictionary::load(path);
        debug!(key = ?key, words = dict.word_count(), "dictionary cached");
        self.entries.insert(key, dict.clone());
        dict
    }

    /// Strict form of [`DictionaryCache::get_or_load`]. Failures are not cached.
    ///
    /// A built-in fallback cached under `path` by a lenient lookup does not
    /// count as loaded: the file is read again, and replaces the fallback on
    /// success.
    pub fn try_get_or_load(&mut self, path: &Path) -> Result<Dictionary, LoadError> {
        let key = CacheKey::resolve(Some(path));
        if let Some(dict) = self.entries.get(&key)
            && *dict.source() != DictionarySource::Builtin
        {
            return Ok(dict.clone());
        }
        let dict = Dictionary::try_load(path)?;
        debug!(key = ?key, words = dict.word_count(), "dictionary cached");
        self.entries.insert(key, dict.clone());
        Ok(dict)
    }

    /// Store a dictionary under an explicit key, returning the one it replaces.
    pub fn insert(&mut self, key: CacheKey, dict: Dictionary) -> Option<Dictionary> {
        self.entries.insert(key, dict)
    }

    pub fn get(&self, path: Option<&Path>) -> Option<&Dictionary> {
        self.entries.get(&CacheKey::resolve(path))
    }

    pub fn remove(&mut self, path: Option<&Path>) -> Option<Dictionary> {
        self.entries.remove(&CacheKey::resolve(path))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn word_file(words: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(words.as_bytes()).unwrap();
        f
    }

    #[test]
    fn reuses_loaded_dictionary() {
        let file = word_file("ฉัน\nไป\n");
        let mut cache = DictionaryCache::new();
        let a = cache.get_or_load(Some(file.path()));
        let b = cache.get_or_load(Some(file.path()));
        assert!(a.same_index(&b));
        assert_eq!(cache.len(), 1);
        assert_eq!(a.word_count(), 2);
    }

    #[test]
    fn different_spellings_share_an_entry() {
        let file = word_file("ไป\n");
        let dir = file.path().parent().unwrap();
        let name = file.path().file_name().unwrap();
        let dotted = dir.join(".").join(name);

        let mut cache = DictionaryCache::new();
        let a = cache.get_or_load(Some(file.path()));
        let b = cache.get_or_load(Some(&dotted));
        assert!(a.same_index(&b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn builtin_and_files_are_separate_keys() {
        let file = word_file("ไป\n");
        let mut cache = DictionaryCache::new();
        cache.get_or_load(None);
        cache.get_or_load(Some(file.path()));
        assert_eq!(cache.len(), 2);
        assert!(cache.get(None).is_some());
    }

    #[test]
    fn clear_and_remove_invalidate() {
        let file = word_file("ไป\n");
        let mut cache = DictionaryCache::new();
        let first = cache.get_or_load(Some(file.path()));
        assert!(cache.remove(Some(file.path())).is_some());
        assert!(cache.is_empty());

        let second = cache.get_or_load(Some(file.path()));
        assert!(!first.same_index(&second));

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(Some(file.path())).is_none());
    }

    #[test]
    fn strict_failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let mut cache = DictionaryCache::new();
        assert!(cache.try_get_or_load(&missing).is_err());
        assert!(cache.is_empty());

        // lenient lookup caches the fallback
        let dict = cache.get_or_load(Some(&missing));
        assert!(dict.same_index(&Dictionary::builtin()));
        assert_eq!(cache.len(), 1);

        // the cached fallback does not satisfy a strict lookup
        assert!(matches!(
            cache.try_get_or_load(&missing),
            Err(LoadError::Io { .. })
        ));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn strict_lookup_replaces_fallback_once_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        // canonical up front, so the key is the same before and after the file exists
        let path = dir.path().canonicalize().unwrap().join("words.txt");
        let mut cache = DictionaryCache::new();
        let fallback = cache.get_or_load(Some(&path));
        assert_eq!(fallback.source(), &DictionarySource::Builtin);

        std::fs::write(&path, "ฉัน\nไป\n").unwrap();
        let loaded = cache.try_get_or_load(&path).unwrap();
        assert_eq!(loaded.word_count(), 2);
        assert!(matches!(loaded.source(), DictionarySource::File(_)));
        assert!(cache.get(Some(&path)).unwrap().same_index(&loaded));
        assert_eq!(cache.len(), 1);
    }
}
