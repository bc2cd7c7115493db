//! Vocabulary frequency spectrum.
//!
//! For a text of `N` word tokens and `V` distinct word-forms, the spectrum
//! `V(i, N)` is the number of word-forms that occur exactly `i` times. Most
//! vocabulary-richness formulas are closed-form functions of `N`, `V` and a
//! few spectrum elements.
//!
//! Word-forms are compared exactly: case-sensitive, no stemming.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::is_word;
use crate::nlp::Token;

/// Word counts, frequency spectrum and its normalization for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VocabularySpectrum {
    word_count: usize,
    counts: BTreeMap<String, usize>,
    spectrum: BTreeMap<usize, usize>,
    probabilities: BTreeMap<usize, f64>,
}

impl VocabularySpectrum {
    /// Build the spectrum from a token sequence, ignoring non-words.
    #[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut word_count = 0;
        for token in tokens.iter().filter(|t| is_word(t.text())) {
            *counts.entry(token.text().to_string()).or_default() += 1;
            word_count += 1;
        }

        let mut spectrum: BTreeMap<usize, usize> = BTreeMap::new();
        for &occurrences in counts.values() {
            *spectrum.entry(occurrences).or_default() += 1;
        }

        let vocabulary_size = counts.len();
        let probabilities = spectrum
            .iter()
            .map(|(&i, &forms)| (i, forms as f64 / vocabulary_size as f64))
            .collect();

        tracing::debug!(word_count, vocabulary_size, "spectrum built");
        Self {
            word_count,
            counts,
            spectrum,
            probabilities,
        }
    }

    /// `N`: number of word tokens.
    pub const fn word_count(&self) -> usize {
        self.word_count
    }

    /// `V`: number of distinct word-forms.
    pub fn vocabulary_size(&self) -> usize {
        self.counts.len()
    }

    /// Occurrence count per word-form.
    pub const fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// `i → V(i, N)`.
    pub const fn spectrum(&self) -> &BTreeMap<usize, usize> {
        &self.spectrum
    }

    /// `i → V(i, N) / V`.
    pub const fn probabilities(&self) -> &BTreeMap<usize, f64> {
        &self.probabilities
    }

    /// Occurrences of one word-form (0 if absent).
    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// `V(i, N)`: number of word-forms occurring exactly `i` times.
    pub fn frequency(&self, i: usize) -> usize {
        self.spectrum.get(&i).copied().unwrap_or(0)
    }
}
