//! Word classification and length measures.
//!
//! A word is a "continuous string of graphemes and/or digits" (Grieve, 2007):
//! letters and numbers, signed decimal literals, and letters carrying
//! combining diacritics that the tokenizer left as separate code points.
//!
//! Lengths are *visual* lengths: combining marks are excluded by default so
//! that `"θεὸσ"` has the same length whether it arrives precomposed or
//! decomposed.

use std::sync::LazyLock;

use regex::Regex;
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::error::{MeasureError, MeasureResult};

/// Signed decimal literal: `+12.34`, `-99`, `99.`.
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+\.?\d*$").expect("valid regex"));

/// Sentence body: one optional inverted opener, then everything up to the
/// trailing run of terminators and whitespace.
static SENTENCE_BODY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^[¿¡]?(.*?)[.!? \n]*$").expect("valid regex"));

/// Returns `true` for Unicode letters (`L*`) and numbers (`N*`).
pub fn is_alphanumeric(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// Returns `true` for combining diacritics (non-spacing and enclosing marks).
pub fn is_combining(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::NonspacingMark | GeneralCategory::EnclosingMark
    )
}

/// Decide whether a token's surface text is a word.
///
/// ```
/// use stylometry_core::classify::is_word;
///
/// assert!(is_word("hello"));
/// assert!(is_word("-99.99"));
/// assert!(!is_word("12/34"));
/// assert!(!is_word("abc_123"));
/// ```
pub fn is_word(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if text.chars().all(is_alphanumeric) {
        return true;
    }
    if NUMBER_PATTERN.is_match(text) {
        return true;
    }
    text.chars().all(|c| is_alphanumeric(c) || is_combining(c))
}

/// Length of a word in letters and digits.
///
/// Diacritics stored as separate code points add to the length only when
/// `exclude_combining` is off. Other punctuation never counts.
pub fn word_length(text: &str, exclude_combining: bool) -> usize {
    text.chars()
        .filter(|&c| is_alphanumeric(c) || (!exclude_combining && is_combining(c)))
        .count()
}

/// Strip the inverted opener and the trailing terminator run from a sentence.
///
/// Fails with [`MeasureError::MalformedSentence`] if the body cannot be
/// extracted.
pub fn sentence_body(sentence: &str) -> MeasureResult<&str> {
    SENTENCE_BODY_PATTERN
        .captures(sentence)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| MeasureError::MalformedSentence(sentence.to_string()))
}

/// Length of a sentence in characters, excluding `?`, `!`, line breaks and
/// the closing period.
pub fn sentence_length_in_characters(
    sentence: &str,
    exclude_combining: bool,
) -> MeasureResult<usize> {
    let body = sentence_body(sentence)?;
    Ok(body
        .chars()
        .filter(|&c| !(exclude_combining && is_combining(c)))
        .count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_words() {
        assert!(is_word("This"));
        assert!(is_word("eee888"));
        assert!(is_word("θεὸσ"));
        assert!(is_word("ἀρχῇ"));
    }

    #[test]
    fn signed_numbers_are_words() {
        for text in ["99.00", "-99.99", "+12.34", "42", "7."] {
            assert!(is_word(text), "{text} should be a word");
        }
    }

    #[test]
    fn mixed_punctuation_is_not_a_word() {
        for text in ["12/34", "abc_123", "_99999_", "123/456", "_ab_", ".", "e-mail", ""] {
            assert!(!is_word(text), "{text} should not be a word");
        }
    }

    #[test]
    fn decomposed_diacritics_still_form_words() {
        // "é" as e + COMBINING ACUTE ACCENT
        assert!(is_word("cafe\u{301}"));
        // Hebrew with niqqud points
        assert!(is_word("בְּרֵאשִׁית"));
    }

    #[test]
    fn word_length_excludes_combining_marks() {
        assert_eq!(word_length("cafe\u{301}", true), 4);
        assert_eq!(word_length("cafe\u{301}", false), 5);
        assert_eq!(word_length("999.99", true), 5);
        assert_eq!(word_length("_99999_", true), 5);
    }

    #[test]
    fn word_length_counts_marks_when_asked() {
        // three letters, three niqqud points
        assert_eq!(word_length("בָּרָא", true), 3);
        assert_eq!(word_length("בָּרָא", false), 6);
        assert_eq!(word_length("a-b", false), 2);
    }

    #[test]
    fn sentence_terminators_are_stripped() {
        for sentence in ["This is a test.", "This is a test!!!", "This is a test?"] {
            assert_eq!(sentence_length_in_characters(sentence, true).unwrap(), 14);
        }
    }

    #[test]
    fn inverted_openers_are_stripped() {
        assert_eq!(sentence_body("¿Qué pasa?").unwrap(), "Qué pasa");
        assert_eq!(sentence_body("¡Hola!").unwrap(), "Hola");
    }

    #[test]
    fn trailing_whitespace_and_newlines_are_stripped() {
        assert_eq!(sentence_body("Done. \n").unwrap(), "Done");
    }

    #[test]
    fn inner_line_breaks_are_kept() {
        assert_eq!(sentence_body("one\ntwo.").unwrap(), "one\ntwo");
    }

    #[test]
    fn sentence_length_combining_toggle() {
        let sentence = "cafe\u{301} noir.";
        assert_eq!(sentence_length_in_characters(sentence, true).unwrap(), 9);
        assert_eq!(sentence_length_in_characters(sentence, false).unwrap(), 10);
    }
}
