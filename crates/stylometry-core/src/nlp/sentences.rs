//! Sentence segmentation.
//!
//! A character scan with context-based boundary detection: terminator runs
//! (`.`, `!`, `?`, `...`) end a sentence unless the context says otherwise
//! (abbreviations, initials, decimals, lowercase Latin continuations).
//! Blank lines always end a sentence.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::model::Language;
use crate::classify::is_combining;

/// Regex for initials (J.K., U.S.A., etc.).
static INITIALS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]\.(?:[A-Z]\.?)*$").expect("valid regex"));

/// Split text into sentence byte ranges.
///
/// Each range is trimmed of surrounding whitespace and non-empty. Closing
/// quotes and brackets that follow a terminator stay with its sentence.
#[tracing::instrument(skip_all, fields(text_len = text.len(), language = language.code()))]
pub fn split_sentences(text: &str, language: Language) -> Vec<Range<usize>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i].1;

        if is_sentence_terminator(ch) {
            let mut end = i;
            while end + 1 < chars.len() && is_sentence_terminator(chars[end + 1].1) {
                end += 1;
            }

            let context = extract_context(&chars, i, end);
            if is_sentence_boundary(&context, language) {
                while end + 1 < chars.len() && is_closing(chars[end + 1].1) {
                    end += 1;
                }
                let stop = byte_end(&chars, end);
                push_trimmed(text, start..stop, &mut spans);
                start = stop;
            }
            i = end + 1;
            continue;
        }

        if ch == '\n' && is_paragraph_break(&chars, i) {
            let stop = byte_end(&chars, i);
            push_trimmed(text, start..stop, &mut spans);
            start = stop;
        }

        i += 1;
    }

    // Remaining text
    push_trimmed(text, start..text.len(), &mut spans);
    spans
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '…')
}

const fn is_closing(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '}' | '»' | '”' | '’')
}

fn byte_end(chars: &[(usize, char)], idx: usize) -> usize {
    let (pos, ch) = chars[idx];
    pos + ch.len_utf8()
}

/// A newline followed (after optional spaces or tabs) by another newline.
fn is_paragraph_break(chars: &[(usize, char)], pos: usize) -> bool {
    chars[pos + 1..]
        .iter()
        .map(|&(_, c)| c)
        .find(|&c| c != ' ' && c != '\t' && c != '\r')
        == Some('\n')
}

fn push_trimmed(text: &str, range: Range<usize>, spans: &mut Vec<Range<usize>>) {
    let slice = &text[range.clone()];
    let leading = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if !trimmed.is_empty() {
        let lo = range.start + leading;
        spans.push(lo..lo + trimmed.len());
    }
}

/// Context around a potential sentence boundary.
struct SentenceContext {
    punctuation: char,
    run_length: usize,
    word_before: String,
    /// Character immediately after the terminator run, whitespace included.
    adjacent: Option<char>,
    /// First non-whitespace character after the terminator run.
    char_after: Option<char>,
    text_after: String,
    is_end_of_text: bool,
}

fn extract_context(chars: &[(usize, char)], run_start: usize, run_end: usize) -> SentenceContext {
    let mut after_start = run_end + 1;
    while after_start < chars.len() && chars[after_start].1.is_whitespace() {
        after_start += 1;
    }

    let run: Vec<char> = chars[run_start..=run_end].iter().map(|&(_, c)| c).collect();
    let punctuation = run
        .iter()
        .copied()
        .find(|c| matches!(c, '!' | '?'))
        .unwrap_or(run[run.len() - 1]);

    SentenceContext {
        punctuation,
        run_length: run.len(),
        word_before: get_word_before(chars, run_start),
        adjacent: chars.get(run_end + 1).map(|&(_, c)| c),
        char_after: chars.get(after_start).map(|&(_, c)| c),
        text_after: chars[after_start.min(chars.len())..]
            .iter()
            .take(20)
            .map(|&(_, c)| c)
            .collect(),
        is_end_of_text: chars[run_end + 1..]
            .iter()
            .all(|&(_, c)| c.is_whitespace() || is_closing(c)),
    }
}

fn get_word_before(chars: &[(usize, char)], pos: usize) -> String {
    let mut word_chars: Vec<char> = chars[..pos]
        .iter()
        .rev()
        .map(|&(_, c)| c)
        .take_while(|&c| c.is_alphanumeric() || is_combining(c) || c == '.')
        .collect();
    word_chars.reverse();
    word_chars.into_iter().collect()
}

fn is_sentence_boundary(context: &SentenceContext, language: Language) -> bool {
    if context.is_end_of_text {
        return true;
    }

    // ! and ? are almost always boundaries
    if context.punctuation == '!' || context.punctuation == '?' {
        return check_next_char_capitalization(context);
    }

    // Ellipses trail off mid-sentence more often than they end one
    if context.punctuation == '…' || context.run_length > 1 {
        return false;
    }

    if is_likely_abbreviation(&context.word_before, language) {
        return false;
    }

    if is_likely_initial(&context.word_before, language) {
        return false;
    }

    // Period glued to the next alphanumeric: decimals (3.14), domains, e.g
    if context.adjacent.is_some_and(char::is_alphanumeric) {
        return false;
    }

    // A lowercase Latin letter after a lone period usually continues the
    // sentence ("approx. five"). Other scripts do not mark sentence starts
    // with case reliably, so only Latin is checked.
    !context
        .char_after
        .is_some_and(|c| c.is_lowercase() && is_latin(c))
}

/// Basic Latin through Latin Extended-B, plus Latin Extended Additional.
const fn is_latin(ch: char) -> bool {
    matches!(ch, 'a'..='z' | 'A'..='Z' | '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}')
}

fn check_next_char_capitalization(context: &SentenceContext) -> bool {
    if let Some(next_char) = context.char_after
        && matches!(next_char, '"' | '\'' | '“' | '‘')
    {
        return context
            .text_after
            .chars()
            .nth(1)
            .is_none_or(|c| !c.is_lowercase());
    }
    true
}

fn is_likely_abbreviation(word: &str, language: Language) -> bool {
    !word.is_empty() && language.is_abbreviation(word)
}

fn is_likely_initial(word: &str, language: Language) -> bool {
    // English "I." is the pronoun ending a sentence
    if word == "I" && language == Language::English {
        return false;
    }
    // Single uppercase letter (J. Smith) or dotted initials (U.S.A)
    let mut letters = word.chars();
    if let (Some(first), None) = (letters.next(), letters.next())
        && first.is_uppercase()
    {
        return true;
    }
    INITIALS_PATTERN.is_match(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        split_sentences(text, Language::English)
            .into_iter()
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn basic_sentences() {
        let found = sentences("This is a sentence. This is another sentence.");
        assert_eq!(found, vec!["This is a sentence.", "This is another sentence."]);
    }

    #[test]
    fn abbreviations_not_split() {
        let found = sentences("Dr. Smith went to the store. He bought milk.");
        assert_eq!(found.len(), 2);
        assert!(found[0].contains("Dr. Smith"));
    }

    #[test]
    fn decimal_numbers_not_split() {
        let found = sentences("The price is 3.14 dollars. That's cheap.");
        assert_eq!(found.len(), 2);
        assert!(found[0].contains("3.14"));
    }

    #[test]
    fn question_and_exclamation() {
        let found = sentences("Are you serious? I can't believe it! This is amazing.");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn terminator_runs_stay_together() {
        let found = sentences("Stop!!! Who goes there?! Nobody.");
        assert_eq!(found, vec!["Stop!!!", "Who goes there?!", "Nobody."]);
    }

    #[test]
    fn closing_quotes_stay_with_sentence() {
        let found = sentences("He said \"stop.\" Then he left.");
        assert_eq!(found, vec!["He said \"stop.\"", "Then he left."]);
    }

    #[test]
    fn blank_lines_end_sentences() {
        let found = sentences("A heading\n\nThe body starts here.");
        assert_eq!(found, vec!["A heading", "The body starts here."]);
    }

    #[test]
    fn single_newlines_do_not_split() {
        let found = sentences("A sentence that\nwraps onto two lines.");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn ranges_are_trimmed() {
        let text = "  First one.   Second one.  ";
        let ranges = split_sentences(text, Language::English);
        assert_eq!(&text[ranges[0].clone()], "First one.");
        assert_eq!(&text[ranges[1].clone()], "Second one.");
    }

    #[test]
    fn abbreviations_are_language_specific() {
        let text = "Ask Dr. Who.";
        assert_eq!(split_sentences(text, Language::English).len(), 1);
        assert_eq!(split_sentences(text, Language::Greek).len(), 2);
    }

    #[test]
    fn caseless_scripts_split_on_period() {
        let found = sentences("בְּרֵאשִׁית בָּרָא. אֵת הַשָּׁמַיִם.");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn lowercase_greek_starts_a_sentence() {
        // NFD: breathing and accent marks follow their base letters
        let found = sentences(
            "This is another sentence. \u{3b5}\u{313}\u{3bd} \u{3b1}\u{313}\u{3c1}\u{3c7}\u{3b7}\u{342}\u{345}.",
        );
        assert_eq!(found.len(), 2);
        let found = sentences("Here it is. ελα εδω τωρα.");
        assert_eq!(found, vec!["Here it is.", "ελα εδω τωρα."]);
    }

    #[test]
    fn lowercase_latin_continues_a_sentence() {
        let found = sentences("It took approx. five minutes. Then it ended.");
        assert_eq!(found.len(), 2);
        let found = sentences("It ended in the cafe. and then nothing.");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn pronoun_i_ends_a_sentence() {
        let found = sentences("This too. I. That was short.");
        assert_eq!(found, vec!["This too.", "I.", "That was short."]);
        let found = sentences("We met J. Smith there.");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn empty_input() {
        assert!(split_sentences("", Language::English).is_empty());
        assert!(split_sentences("   ", Language::English).is_empty());
    }
}
