//! Dictionaries for text segmentation.
//!
//! Provides curated word sets used by the rule pipeline's sentence splitter
//! and tokenizer.

pub mod abbreviations;
