//! Prefix tree over Unicode codepoints.
//!
//! Nodes live in a single arena owned by the [`Trie`]; children are kept in a
//! small sorted vector per node and found by binary search. Dropping the trie
//! releases every node at once.

use std::io::BufRead;

use smallvec::SmallVec;

use crate::errors::LoadError;
use crate::unicode::{codepoints, decode_at};

type NodeId = u32;

const ROOT: usize = 0;

/// Byte lengths of the dictionary words found at one position, shortest first.
pub type Prefixes = SmallVec<[usize; 8]>;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    is_end: bool,
    children: SmallVec<[(u32, NodeId); 4]>,
}

impl TrieNode {
    #[inline(always)]
    fn child(&self, cp: u32) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&cp, |&(c, _)| c)
            .ok()
            .map(|i| self.children[i].1)
    }

    #[inline]
    fn attach(&mut self, cp: u32, id: NodeId) {
        let at = self.children.partition_point(|&(c, _)| c < cp);
        self.children.insert(at, (cp, id));
    }
}

#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    words: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            words: 0,
        }
    }

    /// Build a trie from an in-memory word list.
    pub fn from_words<I, S>(words: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word.as_ref())?;
        }
        Ok(trie)
    }

    /// Number of distinct words.
    #[inline]
    pub fn word_count(&self) -> usize {
        self.words
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Number of nodes, root included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a word. Surrounding spaces, tabs, CR and LF are trimmed; a word that
    /// is empty after trimming is ignored.
    ///
    /// Returns `Ok(true)` when the word was not present before.
    ///
    /// # Errors
    ///
    /// [`LoadError::Allocation`] when the arena cannot grow. Nothing of the word
    /// is attached to the tree in that case.
    pub fn insert(&mut self, word: &str) -> Result<bool, LoadError> {
        self.insert_bytes(word.as_bytes())
    }

    /// Byte form of [`Trie::insert`]; malformed UTF-8 is decoded leniently.
    pub fn insert_bytes(&mut self, word: &[u8]) -> Result<bool, LoadError> {
        let word = trim_word(word);
        if word.is_empty() {
            return Ok(false);
        }

        let mut node = ROOT;
        let mut pos = 0;
        while pos < word.len() {
            let (cp, len) = decode_at(word, pos);
            match self.nodes[node].child(cp) {
                Some(next) => {
                    node = next as usize;
                    pos += len;
                }
                None => break,
            }
        }

        if pos < word.len() {
            // Everything the new tail needs is reserved before the first node is attached.
            let tail = codepoints(word, pos).count();
            NodeId::try_from(self.nodes.len() + tail).map_err(|_| LoadError::Allocation)?;
            self.nodes.try_reserve(tail)?;
            self.nodes[node].children.try_reserve(1)?;

            for (_, cp, _) in codepoints(word, pos) {
                let id = self.nodes.len() as NodeId;
                self.nodes.push(TrieNode::default());
                self.nodes[node].attach(cp, id);
                node = id as usize;
            }
        }

        let end = &mut self.nodes[node];
        if end.is_end {
            return Ok(false);
        }
        end.is_end = true;
        self.words += 1;
        Ok(true)
    }

    /// Whether `word` (after trimming) is a dictionary word.
    pub fn contains(&self, word: &str) -> bool {
        let word = trim_word(word.as_bytes());
        if word.is_empty() {
            return false;
        }
        let mut node = &self.nodes[ROOT];
        for (_, cp, _) in codepoints(word, 0) {
            match node.child(cp) {
                Some(next) => node = &self.nodes[next as usize],
                None => return false,
            }
        }
        node.is_end
    }

    /// Read one word per line from `reader`.
    ///
    /// One trailing `\n` and then one trailing `\r` are stripped from each line;
    /// lines left empty are skipped. Returns the number of non-empty lines.
    ///
    /// # Errors
    ///
    /// [`LoadError::Io`] when the reader fails, [`LoadError::Allocation`] when the
    /// trie cannot grow. Words inserted before the failure stay in the trie.
    pub fn load_lines<R: BufRead>(&mut self, mut reader: R) -> Result<usize, LoadError> {
        let mut buf = Vec::new();
        let mut count = 0;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| LoadError::io("<reader>", e))?;
            if read == 0 {
                break;
            }
            count += self.load_line(&buf)?;
        }
        Ok(count)
    }

    /// Same as [`Trie::load_lines`] over a buffer already in memory.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize, LoadError> {
        let mut count = 0;
        let mut start = 0;
        for end in memchr::memchr_iter(b'\n', bytes) {
            count += self.load_line(&bytes[start..=end])?;
            start = end + 1;
        }
        if start < bytes.len() {
            count += self.load_line(&bytes[start..])?;
        }
        Ok(count)
    }

    fn load_line(&mut self, line: &[u8]) -> Result<usize, LoadError> {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            return Ok(0);
        }
        self.insert_bytes(line)?;
        Ok(1)
    }

    /// Byte lengths of every dictionary word that starts at `offset` in `text`,
    /// shortest first.
    ///
    /// The walk follows the codepoints of `text` from the root and stops at the
    /// first codepoint without a matching edge or at the end of `text`, so no
    /// length ever exceeds `text.len() - offset`.
    pub fn prefixes_at(&self, text: &[u8], offset: usize) -> Prefixes {
        let mut found = Prefixes::new();
        let mut node = &self.nodes[ROOT];
        for (at, cp, len) in codepoints(text, offset) {
            let Some(next) = node.child(cp) else {
                break;
            };
            node = &self.nodes[next as usize];
            if node.is_end {
                found.push(at + len - offset);
            }
        }
        found
    }

    /// `!self.prefixes_at(text, offset).is_empty()` without collecting.
    pub fn has_prefix_at(&self, text: &[u8], offset: usize) -> bool {
        let mut node = &self.nodes[ROOT];
        for (_, cp, _) in codepoints(text, offset) {
            let Some(next) = node.child(cp) else {
                return false;
            };
            node = &self.nodes[next as usize];
            if node.is_end {
                return true;
            }
        }
        false
    }
}

fn trim_word(word: &[u8]) -> &[u8] {
    let is_blank = |b: &u8| matches!(b, b' ' | b'\t' | b'\r' | b'\n');
    let start = word.iter().position(|b| !is_blank(b)).unwrap_or(word.len());
    let end = word.iter().rposition(|b| !is_blank(b)).map_or(start, |i| i + 1);
    &word[start..end]
}
