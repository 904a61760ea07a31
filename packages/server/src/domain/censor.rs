//! Profanity filtering for free-text answers.
//!
//! The filter replaces offending characters, which does not preserve the
//! UTF-8 byte length in general. Callers that need a fixed length pass the
//! result through [`fit_to_length`].

use rustrict::CensorStr;

/// Censor profanity in `text`.
///
/// Text without profanity is returned as is; the filter's normalization
/// (diacritics, full-width forms) only applies to text it masks.
pub fn censor(text: &str) -> String {
    if text.is_inappropriate() {
        text.censor()
    } else {
        text.to_string()
    }
}

/// Force `text` to exactly `len` bytes.
///
/// Longer text is cut at the last char boundary at or below `len`, then any
/// shortfall is padded with NUL bytes.
pub fn fit_to_length(mut text: String, len: usize) -> String {
    if text.len() > len {
        let mut cut = len;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    let shortfall = len - text.len();
    text.extend(std::iter::repeat_n('\0', shortfall));
    text
}
