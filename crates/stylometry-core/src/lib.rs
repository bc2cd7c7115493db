//! Core library for stylometry.
//!
//! Stylometric measurements over natural-language text: word and sentence
//! length statistics and vocabulary-richness formulas built on the
//! vocabulary frequency spectrum.
//!
//! # Modules
//!
//! - [`classify`] - Word classification and visual lengths
//! - [`nlp`] - Pipeline boundary, models and the built-in rule pipeline
//! - [`document`] - Text plus its lazily memoized parse
//! - [`spectrum`] - Vocabulary frequency spectrum
//! - [`measurements`] - The measurement functions
//! - [`registry`] / [`args`] - Named measurements and argument binding
//! - [`measurer`] - Execution context with a document cache
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use stylometry_core::{Measurer, Value};
//!
//! let measurer = Measurer::new()?;
//! let text = "This is the first sentence. This is another sentence. Here it ends.";
//! assert_eq!(measurer.measure_text("word_count", text)?, Value::Count(12));
//! assert_eq!(
//!     measurer.measure_text("average_sentence_length_in_words", text)?,
//!     Value::Scalar(4.0)
//! );
//! # Ok::<(), stylometry_core::MeasureError>(())
//! ```
#![deny(unsafe_code)]

pub mod args;
pub mod classify;
pub mod config;
pub mod dictionaries;
pub mod distribution;
pub mod document;
pub mod error;
pub mod measurements;
pub mod measurer;
pub mod nlp;
pub mod registry;
pub mod spectrum;
pub mod value;

pub use args::{Argument, Arguments, Param, ParamValue, Params};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use distribution::{Bucket, Distribution, RangeBucket, RangeDistribution};
pub use document::{Document, DocumentRef, Sentence, TextInput};
pub use error::{ConfigError, ConfigResult, MeasureError, MeasureResult, ModelError};
pub use measurer::{DEFAULT_CACHE_CAPACITY, Measurer};
pub use nlp::{DEFAULT_MODEL, Language, Model, Pipeline, RulePipeline, Token};
pub use registry::{MeasureFn, Measurement, Registry};
pub use spectrum::VocabularySpectrum;
pub use value::Value;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
