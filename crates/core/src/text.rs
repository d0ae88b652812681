//! Title text cleanup.
//!
//! Titles come out of the file formats with soft line breaks (vertical
//! tabs), tab characters, and hard line breaks embedded; an index line
//! or a TOC paragraph needs a single flat string.

use unicode_normalization::UnicodeNormalization;

/// Characters stripped from titles: vertical tab (soft line break in
/// PowerPoint text frames), horizontal tab (would corrupt the
/// tab-separated index), and line breaks.
const STRIPPED_CHARS: &[char] = &['\u{000B}', '\t', '\r', '\n'];

/// Flatten a raw title into a single NFC-normalized line.
///
/// Stripped characters are removed, not replaced with spaces, matching
/// how multi-line titles are joined on the slides themselves.
pub fn clean_title(raw: &str) -> String {
    raw.chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .nfc()
        .collect()
}
