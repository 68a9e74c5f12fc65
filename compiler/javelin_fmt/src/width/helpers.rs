//! Character and text width.
//!
//! Columns are counted in display cells, so CJK ideographs and most emoji
//! take two cells and combining marks none.

/// Display width of a character.
///
/// Based on Unicode Standard Annex #11 (East Asian Width), simplified to the
/// ranges that appear in source code in practice.
#[inline]
pub(crate) fn char_display_width(c: char) -> usize {
    let cp = c as u32;
    if cp < 0x300 {
        return 1;
    }
    if is_zero_width(cp) {
        return 0;
    }
    if is_double_width(cp) {
        return 2;
    }
    1
}

#[inline]
fn is_zero_width(cp: u32) -> bool {
    matches!(cp,
        // Combining Diacritical Marks (+ Extended, Supplement, for Symbols)
        0x0300..=0x036F |
        0x1AB0..=0x1AFF |
        0x1DC0..=0x1DFF |
        0x20D0..=0x20FF |
        // Combining Half Marks
        0xFE20..=0xFE2F |
        // ZWSP, ZWNJ, ZWJ, LRM, RLM
        0x200B..=0x200F |
        0x2060..=0x2064 |
        0xFEFF
    )
}

#[inline]
fn is_double_width(cp: u32) -> bool {
    matches!(cp,
        // CJK ideographs and compatibility ideographs
        0x3400..=0x4DBF |
        0x4E00..=0x9FFF |
        0xF900..=0xFAFF |
        0x20000..=0x2FFFF |
        // Hangul Syllables
        0xAC00..=0xD7A3 |
        // Fullwidth Forms
        0xFF01..=0xFF60 |
        0xFFE0..=0xFFE6 |
        // Kana, Bopomofo, CJK symbols and punctuation
        0x3000..=0x30FF |
        0x3100..=0x312F |
        0x3200..=0x33FF |
        // Emoji
        0x1F300..=0x1FBFF |
        0x2600..=0x27BF
    )
}

/// Display width of single-line text.
pub(crate) fn text_width(text: &str) -> usize {
    if text.is_ascii() {
        return text.len();
    }
    text.chars().map(char_display_width).sum()
}
