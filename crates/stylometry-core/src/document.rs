//! Documents: raw text plus its lazily produced parse.
//!
//! A [`Document`] runs its model's pipeline at most once. The parse and the
//! vocabulary spectrum are memoized on first use and live as long as the
//! document does.

use std::borrow::Cow;
use std::cell::OnceCell;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

use crate::classify::is_word;
use crate::error::MeasureResult;
use crate::nlp::{DEFAULT_MODEL, Model, Parsed, Token};
use crate::spectrum::VocabularySpectrum;

/// Raw text bound to a model, tokenized on demand.
#[derive(Debug)]
pub struct Document {
    text: String,
    model: Arc<Model>,
    parsed: OnceCell<Parsed>,
    spectrum: OnceCell<VocabularySpectrum>,
}

impl Document {
    /// Wrap `text` with the default model.
    ///
    /// Fails if the default model cannot be loaded.
    pub fn new(text: impl Into<String>) -> MeasureResult<Self> {
        let model = Model::load(DEFAULT_MODEL)?;
        Ok(Self::with_model(text, Arc::new(model)))
    }

    /// Wrap `text` with an already loaded model.
    pub fn with_model(text: impl Into<String>, model: Arc<Model>) -> Self {
        Self {
            text: text.into(),
            model,
            parsed: OnceCell::new(),
            spectrum: OnceCell::new(),
        }
    }

    /// The raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The model this document is parsed with.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Whether the pipeline has already run.
    pub fn is_tokenized(&self) -> bool {
        self.parsed.get().is_some()
    }

    /// Run the pipeline if it has not run yet, and return its output.
    pub fn ensure_tokenized(&self) -> &Parsed {
        self.parsed.get_or_init(|| {
            tracing::debug!(text_len = self.text.len(), model = self.model.name(), "tokenizing");
            self.model.process(&self.text)
        })
    }

    /// All tokens, in order.
    pub fn tokens(&self) -> &[Token] {
        &self.ensure_tokenized().tokens
    }

    /// Tokens classified as words.
    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.tokens().iter().filter(|t| is_word(t.text()))
    }

    /// Sentences, in order.
    pub fn sentences(&self) -> impl ExactSizeIterator<Item = Sentence<'_>> {
        let parsed = self.ensure_tokenized();
        parsed.sentences.iter().map(|span| Sentence {
            text: &self.text[span.bytes.clone()],
            tokens: &parsed.tokens[span.tokens.clone()],
        })
    }

    /// The vocabulary spectrum, built on first use.
    pub fn spectrum(&self) -> &VocabularySpectrum {
        self.spectrum
            .get_or_init(|| VocabularySpectrum::from_tokens(self.tokens()))
    }
}

/// One sentence of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Sentence<'a> {
    text: &'a str,
    tokens: &'a [Token],
}

impl<'a> Sentence<'a> {
    /// Source text of the sentence, terminators included.
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Tokens of the sentence.
    pub const fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    /// Number of word tokens in the sentence.
    pub fn word_count(&self) -> usize {
        self.tokens.iter().filter(|t| is_word(t.text())).count()
    }
}

/// Either raw text or a document that is already built.
#[derive(Debug, Clone)]
pub enum TextInput<'a> {
    /// Raw text, wrapped into a document before measuring.
    Raw(Cow<'a, str>),
    /// A prepared document, used as is.
    Document(&'a Document),
}

impl<'a> From<&'a str> for TextInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Raw(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for TextInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Raw(Cow::Borrowed(text))
    }
}

impl From<String> for TextInput<'_> {
    fn from(text: String) -> Self {
        Self::Raw(Cow::Owned(text))
    }
}

impl<'a> From<&'a Document> for TextInput<'a> {
    fn from(document: &'a Document) -> Self {
        Self::Document(document)
    }
}

/// A document handed out by a measurer: borrowed from the caller or shared
/// from the measurer's cache.
#[derive(Debug, Clone)]
pub enum DocumentRef<'a> {
    /// The caller's own document.
    Borrowed(&'a Document),
    /// A cached document built from raw text.
    Shared(Rc<Document>),
}

impl Deref for DocumentRef<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        match self {
            Self::Borrowed(document) => document,
            Self::Shared(document) => document,
        }
    }
}
