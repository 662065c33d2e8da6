//! Thai Character Cluster (TCC) boundaries.
//!
//! A cluster is the smallest run of Thai text that must never be split: a base
//! consonant (possibly preceded by a leading vowel) together with an optional
//! second consonant and the marks attached to it. Rules after Theeramunkong et al.
//!
//! | Starts with     | Cluster                                                               |
//! |-----------------|-----------------------------------------------------------------------|
//! | leading vowel   | vowel, consonant, optional consonant, any run of combining marks      |
//! | leading vowel   | the vowel alone when no consonant follows                             |
//! | consonant       | consonant, optional consonant, any run of marks or following vowels   |
//! | anything else   | that one codepoint                                                    |

use crate::unicode::{
    decode_at, is_combining_mark, is_following_vowel, is_leading_vowel, is_thai_consonant,
};

/// Byte length of the cluster that starts at `pos`. Zero only at end of text.
pub fn cluster_len_at(text: &[u8], pos: usize) -> usize {
    let (cp, len) = decode_at(text, pos);
    if len == 0 {
        return 0;
    }
    let mut end = pos + len;

    if is_leading_vowel(cp) {
        let (next, next_len) = decode_at(text, end);
        if next_len == 0 || !is_thai_consonant(next) {
            return end - pos;
        }
        end += next_len;
        end = skip_one(text, end, is_thai_consonant);
        end = skip_while(text, end, is_combining_mark);
    } else if is_thai_consonant(cp) {
        end = skip_one(text, end, is_thai_consonant);
        end = skip_while(text, end, |c| is_combining_mark(c) || is_following_vowel(c));
    }

    end - pos
}

/// Ascending byte offsets at which each cluster of `text` ends.
///
/// The offsets partition the whole text: they are strictly increasing and the
/// last one equals `text.len()`. Empty text yields no offsets.
pub fn boundaries(text: &[u8]) -> Vec<usize> {
    let mut out = Vec::with_capacity(text.len() / 3 + 1);
    let mut pos = 0;
    while pos < text.len() {
        pos += cluster_len_at(text, pos);
        out.push(pos);
    }
    out
}

/// First boundary strictly after `pos`, or `text_len` when none is left.
#[inline]
pub fn next_boundary(boundaries: &[usize], pos: usize, text_len: usize) -> usize {
    let i = boundaries.partition_point(|&b| b <= pos);
    boundaries.get(i).copied().unwrap_or(text_len)
}

#[inline(always)]
fn skip_one(text: &[u8], pos: usize, pred: impl Fn(u32) -> bool) -> usize {
    let (cp, len) = decode_at(text, pos);
    if len > 0 && pred(cp) { pos + len } else { pos }
}

#[inline(always)]
fn skip_while(text: &[u8], mut pos: usize, pred: impl Fn(u32) -> bool) -> usize {
    loop {
        let (cp, len) = decode_at(text, pos);
        if len == 0 || !pred(cp) {
            return pos;
        }
        pos += len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusters(text: &str) -> Vec<&str> {
        let mut start = 0;
        boundaries(text.as_bytes())
            .into_iter()
            .map(|end| {
                let s = &text[start..end];
                start = end;
                s
            })
            .collect()
    }

    #[test]
    fn empty_text_has_no_boundaries() {
        assert!(boundaries(b"").is_empty());
        assert_eq!(cluster_len_at(b"", 0), 0);
    }

    #[test]
    fn consonant_takes_following_vowel() {
        // ั is a following vowel and stays with ฉ; น starts a new cluster
        assert_eq!(clusters("ฉัน"), vec!["ฉั", "น"]);
    }

    #[test]
    fn leading_vowel_takes_consonants_and_marks() {
        assert_eq!(clusters("โรงเรียน"), vec!["โรง", "เรี", "ยน"]);
        assert_eq!(clusters("ไป"), vec!["ไป"]);
        assert_eq!(clusters("เมื่อ"), vec!["เมื่", "อ"]);
    }

    #[test]
    fn leading_vowel_without_consonant_stands_alone() {
        assert_eq!(clusters("เ"), vec!["เ"]);
        assert_eq!(clusters("เa"), vec!["เ", "a"]);
        assert_eq!(clusters("แ่"), vec!["แ", "่"]);
    }

    #[test]
    fn marks_after_leading_vowel_cluster_exclude_following_vowels() {
        // following vowel า is not absorbed after a leading-vowel cluster
        assert_eq!(clusters("เกา"), vec!["เก", "า"]);
    }

    #[test]
    fn tone_marks_and_signs_attach() {
        assert_eq!(clusters("ที่"), vec!["ที่"]);
        assert_eq!(clusters("ก์"), vec!["ก์"]);
        assert_eq!(clusters("กำ"), vec!["กำ"]);
    }

    #[test]
    fn non_thai_is_one_codepoint_each() {
        assert_eq!(clusters("ab 1"), vec!["a", "b", " ", "1"]);
        assert_eq!(clusters("😀ก"), vec!["😀", "ก"]);
        // Thai digits are Thai but not consonants
        assert_eq!(clusters("๑๒"), vec!["๑", "๒"]);
    }

    #[test]
    fn boundaries_partition_text() {
        let text = "วันนี้อากาศดีมาก hello 123";
        let b = boundaries(text.as_bytes());
        assert!(b.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*b.last().unwrap(), text.len());
        assert_eq!(clusters(text).concat(), text);
    }

    #[test]
    fn next_boundary_is_strictly_greater() {
        let b = boundaries("ฉันไป".as_bytes()); // [6, 9, 15]
        assert_eq!(b, vec![6, 9, 15]);
        assert_eq!(next_boundary(&b, 0, 15), 6);
        assert_eq!(next_boundary(&b, 6, 15), 9);
        assert_eq!(next_boundary(&b, 7, 15), 9);
        assert_eq!(next_boundary(&b, 15, 15), 15);
    }
}
