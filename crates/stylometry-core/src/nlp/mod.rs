//! NLP pipeline boundary.
//!
//! Measurements never tokenize text themselves. They ask a [`Pipeline`] for
//! tokens and sentence boundaries, so any tokenizer can sit behind a
//! [`Model`] as long as it produces [`Parsed`] output. The built-in
//! [`RulePipeline`] is a language-aware rule tokenizer; it makes no claim to
//! match any particular statistical model token for token.

pub mod model;
pub mod sentences;
pub mod tokens;

use std::ops::Range;

use serde::Serialize;

pub use model::{DEFAULT_MODEL, Language, Model, RulePipeline};

/// An atomic lexical unit: a word, number, punctuation mark or symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    text: String,
    offset: usize,
}

impl Token {
    /// Create a token from its surface text and byte offset in the source.
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }

    /// Surface text of the token.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the token in the document text.
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// Location of one sentence in a [`Parsed`] document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceSpan {
    /// Byte range of the sentence in the document text.
    pub bytes: Range<usize>,
    /// Index range of the sentence's tokens in [`Parsed::tokens`].
    pub tokens: Range<usize>,
}

/// Output of a pipeline run: every token, and sentences as token ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    /// Tokens in document order.
    pub tokens: Vec<Token>,
    /// Sentences in document order; token ranges are contiguous.
    pub sentences: Vec<SentenceSpan>,
}

/// Produces tokens and sentence boundaries from a string.
///
/// Implementations must be deterministic: the same text always yields the
/// same [`Parsed`] output.
pub trait Pipeline: Send + Sync + std::fmt::Debug {
    /// Short name of the pipeline (for logging and `info` output).
    fn name(&self) -> &str;

    /// Tokenize and sentence-split `text`.
    fn process(&self, text: &str) -> Parsed;
}
