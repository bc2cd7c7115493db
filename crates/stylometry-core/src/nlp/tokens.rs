//! Rule-based tokenization.
//!
//! Text is split on whitespace, then each chunk is peeled:
//!
//! 1. opening punctuation and currency signs come off the front,
//! 2. closing punctuation comes off the back (runs like `!!!` stay together,
//!    and a period that belongs to an abbreviation stays attached),
//! 3. hyphens, dashes and slashes between a letter or digit and a following
//!    letter split the remainder (`and/or`, `well-known`),
//! 4. English clitics split off the last piece (`do` + `n't`, `it` + `'s`).
//!
//! Signed numbers (`-99.99`), fractions (`12/34`) and snake_case stay whole.

use std::sync::LazyLock;

use regex::Regex;

use super::Token;
use super::model::Language;

/// Whitespace-delimited chunks.
static CHUNK_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid regex"));

/// English clitics, longest first so `n't` wins over `'t`-like tails.
const CLITICS: &[&str] = &[
    "n't", "n’t", "'re", "’re", "'ve", "’ve", "'ll", "’ll", "'s", "’s", "'d", "’d", "'m", "’m",
];

const fn is_prefix(ch: char) -> bool {
    matches!(
        ch,
        '"' | '\''
            | '('
            | '['
            | '{'
            | '«'
            | '‹'
            | '“'
            | '‘'
            | '„'
            | '‚'
            | '¿'
            | '¡'
            | '*'
            | '`'
            | '$'
            | '£'
            | '€'
            | '¥'
            | '#'
            | '<'
    )
}

const fn is_suffix(ch: char) -> bool {
    matches!(
        ch,
        '.' | ','
            | '!'
            | '?'
            | ';'
            | ':'
            | ')'
            | ']'
            | '}'
            | '"'
            | '\''
            | '»'
            | '›'
            | '”'
            | '’'
            | '…'
            | '%'
            | '*'
            | '>'
    )
}

const fn is_infix(ch: char) -> bool {
    matches!(ch, '-' | '–' | '—' | '/')
}

/// Tokenize `text`, appending tokens to `out`.
///
/// `base` is added to every token offset, so a sentence slice can be
/// tokenized with offsets relative to the whole document.
pub fn tokenize_into(text: &str, base: usize, language: Language, out: &mut Vec<Token>) {
    for chunk in CHUNK_PATTERN.find_iter(text) {
        for range in split_chunk(chunk.as_str(), language) {
            out.push(Token::new(
                &chunk.as_str()[range.0..range.1],
                base + chunk.start() + range.0,
            ));
        }
    }
}

/// Tokenize `text` on its own.
pub fn tokenize(text: &str, language: Language) -> Vec<Token> {
    let mut tokens = Vec::new();
    tokenize_into(text, 0, language, &mut tokens);
    tokens
}

/// Split one whitespace-free chunk into token byte ranges.
fn split_chunk(chunk: &str, language: Language) -> Vec<(usize, usize)> {
    let mut lo = 0;
    let mut hi = chunk.len();
    let mut pieces = Vec::new();

    // Prefixes, one character at a time
    while let Some(c) = chunk[lo..hi].chars().next()
        && is_prefix(c)
        && hi - lo > c.len_utf8()
    {
        pieces.push((lo, lo + c.len_utf8()));
        lo += c.len_utf8();
    }

    // Suffixes, grouped into runs of the same character
    let mut suffixes = Vec::new();
    while let Some(c) = chunk[lo..hi].chars().next_back()
        && is_suffix(c)
        && hi - lo > c.len_utf8()
    {
        if c == '.' && keeps_period(&chunk[lo..hi], language) {
            break;
        }
        let width = c.len_utf8();
        let mut run_start = hi - width;
        while run_start > lo && chunk[lo..run_start].ends_with(c) {
            run_start -= width;
        }
        if run_start == lo {
            // The whole remainder is one punctuation run
            break;
        }
        suffixes.push((run_start, hi));
        hi = run_start;
    }

    let core = split_infixes(chunk, lo, hi);
    let last = core.len() - 1;
    for (idx, (start, end)) in core.into_iter().enumerate() {
        if idx == last && language.splits_clitics() {
            pieces.extend(split_clitic(chunk, start, end));
        } else {
            pieces.push((start, end));
        }
    }

    pieces.extend(suffixes.into_iter().rev());
    pieces
}

/// Does the trailing period belong to the word (`Dr.`, `U.S.`, `J.`)?
fn keeps_period(word: &str, language: Language) -> bool {
    let stem = &word[..word.len() - 1];
    if stem.is_empty() || stem.ends_with('.') {
        return false;
    }
    if language.is_abbreviation(stem) {
        return true;
    }
    let mut letters = stem.chars();
    matches!((letters.next(), letters.next()), (Some(c), None) if c.is_uppercase())
}

/// Split `chunk[lo..hi]` at infix punctuation that sits between a letter or
/// digit and a following letter.
fn split_infixes(chunk: &str, lo: usize, hi: usize) -> Vec<(usize, usize)> {
    let core: Vec<(usize, char)> = chunk[lo..hi]
        .char_indices()
        .map(|(pos, c)| (lo + pos, c))
        .collect();

    let mut pieces = Vec::new();
    let mut start = lo;
    for window in core.windows(3) {
        let [(_, before), (pos, mid), (_, after)] = [window[0], window[1], window[2]];
        if is_infix(mid) && before.is_alphanumeric() && after.is_alphabetic() {
            pieces.push((start, pos));
            pieces.push((pos, pos + mid.len_utf8()));
            start = pos + mid.len_utf8();
        }
    }
    pieces.push((start, hi));
    pieces
}

fn split_clitic(chunk: &str, start: usize, end: usize) -> Vec<(usize, usize)> {
    let word = &chunk[start..end];
    CLITICS
        .iter()
        .find(|clitic| {
            let split = word.len().saturating_sub(clitic.len());
            split > 0
                && word.is_char_boundary(split)
                && word[split..].to_lowercase() == **clitic
        })
        .map_or_else(
            || vec![(start, end)],
            |clitic| {
                let split = end - clitic.len();
                vec![(start, split), (split, end)]
            },
        )
}
