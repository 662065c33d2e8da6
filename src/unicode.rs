//! Codepoint decoding and Thai character classes.
//!
//! Everything here is a pure function over bytes or scalar values and is used by
//! the trie, the cluster scanner and the segmenter alike.

/// First and last codepoint of the Thai Unicode block.
pub const THAI_START: u32 = 0x0E00;
pub const THAI_END: u32 = 0x0E7F;

// Byte length of a UTF-8 sequence, keyed by the leading byte's high bits.
// Stray continuation bytes and invalid leads count as a single byte.
#[inline(always)]
pub const fn utf8_len(lead: u8) -> usize {
    if lead & 0x80 == 0 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}

/// Decode the scalar value starting at `pos`.
///
/// Returns `(codepoint, byte_len)`. The decoder is lenient: a malformed leading
/// byte decodes as itself with length 1, and a sequence cut short by the end of
/// the buffer is clamped to the bytes that remain. It never reads past
/// `bytes.len()`. Returns `(0, 0)` when `pos` is at or past the end.
#[inline(always)]
pub fn decode_at(bytes: &[u8], pos: usize) -> (u32, usize) {
    let Some(&lead) = bytes.get(pos) else {
        return (0, 0);
    };
    let len = utf8_len(lead).min(bytes.len() - pos);

    let cont = |i: usize| u32::from(bytes[pos + i] & 0x3F);
    let cp = match len {
        1 => u32::from(lead),
        2 => (u32::from(lead & 0x1F) << 6) | cont(1),
        3 => (u32::from(lead & 0x0F) << 12) | (cont(1) << 6) | cont(2),
        _ => (u32::from(lead & 0x07) << 18) | (cont(1) << 12) | (cont(2) << 6) | cont(3),
    };
    (cp, len)
}

/// Iterate `(byte_offset, codepoint, byte_len)` from `start` to the end of `bytes`.
#[inline]
pub fn codepoints(bytes: &[u8], start: usize) -> Codepoints<'_> {
    Codepoints { bytes, pos: start }
}

#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Iterator for Codepoints<'_> {
    type Item = (usize, u32, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (cp, len) = decode_at(self.bytes, self.pos);
        if len == 0 {
            return None;
        }
        let at = self.pos;
        self.pos += len;
        Some((at, cp, len))
    }
}

impl std::iter::FusedIterator for Codepoints<'_> {}

// ─────────────────────────────────────────────────────────────────────────────
// Thai character classes
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
pub const fn is_thai(cp: u32) -> bool {
    cp >= THAI_START && cp <= THAI_END
}

#[inline(always)]
pub const fn is_non_thai(cp: u32) -> bool {
    !is_thai(cp)
}

// ก..ฮ
#[inline(always)]
pub const fn is_thai_consonant(cp: u32) -> bool {
    matches!(cp, 0x0E01..=0x0E2E)
}

// เ แ โ ใ ไ: written before the consonant they belong to.
#[inline(always)]
pub const fn is_leading_vowel(cp: u32) -> bool {
    matches!(cp, 0x0E40..=0x0E44)
}

// ะ ั า ำ
#[inline(always)]
pub const fn is_following_vowel(cp: u32) -> bool {
    matches!(cp, 0x0E30..=0x0E33)
}

#[inline(always)]
pub const fn is_above_vowel(cp: u32) -> bool {
    matches!(cp, 0x0E34..=0x0E37)
}

#[inline(always)]
pub const fn is_below_vowel(cp: u32) -> bool {
    matches!(cp, 0x0E38 | 0x0E39)
}

// ่ ้ ๊ ๋
#[inline(always)]
pub const fn is_tone_mark(cp: u32) -> bool {
    matches!(cp, 0x0E48..=0x0E4B)
}

// ์ ํ ๎
#[inline(always)]
pub const fn is_thai_sign(cp: u32) -> bool {
    matches!(cp, 0x0E4C..=0x0E4E)
}

/// Marks that attach to the preceding base: tone marks, signs, above and below vowels.
#[inline(always)]
pub const fn is_combining_mark(cp: u32) -> bool {
    is_tone_mark(cp) || is_thai_sign(cp) || is_above_vowel(cp) || is_below_vowel(cp)
}

// ─────────────────────────────────────────────────────────────────────────────
// Non-Thai run classes
// ─────────────────────────────────────────────────────────────────────────────

/// Subclass of a non-Thai codepoint. Adjacent codepoints of the same class
/// (other than `Other`) are grouped into one token by the segmenter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum RunClass {
    Letter, // ASCII a-z, A-Z
    Digit,  // ASCII 0-9; runs also absorb '.' and ','
    Space,  // ' ' and '\t'
    Other,  // anything else outside the Thai block, always a single codepoint
}

#[inline(always)]
pub const fn run_class(cp: u32) -> RunClass {
    match cp {
        0x61..=0x7A | 0x41..=0x5A => RunClass::Letter,
        0x30..=0x39 => RunClass::Digit,
        0x20 | 0x09 => RunClass::Space,
        _ => RunClass::Other,
    }
}

impl RunClass {
    /// Whether a run of this class continues through `cp`.
    #[inline(always)]
    pub const fn continues_with(self, cp: u32) -> bool {
        match self {
            RunClass::Letter => matches!(run_class(cp), RunClass::Letter),
            RunClass::Digit => matches!(run_class(cp), RunClass::Digit) || cp == 0x2E || cp == 0x2C,
            RunClass::Space => matches!(run_class(cp), RunClass::Space),
            RunClass::Other => false,
        }
    }
}
