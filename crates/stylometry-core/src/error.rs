//! Error types for stylometry-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while resolving an NLP model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The model identifier does not name a known language model.
    #[error("model not found: {name}. Known languages: {available}")]
    NotFound {
        /// The model identifier that was requested.
        name: String,
        /// Comma-separated list of supported language codes.
        available: String,
    },
}

/// Errors that can occur while measuring a document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// The document has nothing to divide by (no words, sentences or
    /// vocabulary), or the formula produced a non-finite value.
    #[error("{measurement} is undefined for this input: {reason}")]
    Degenerate {
        /// Name of the measurement that failed.
        measurement: &'static str,
        /// Which quantity made the formula undefined.
        reason: &'static str,
    },

    /// The body of a sentence could not be separated from its terminator.
    #[error("could not extract sentence body from {0:?}")]
    MalformedSentence(String),

    /// No `text` argument could be resolved from the call arguments.
    #[error("missing required text argument")]
    MissingText,

    /// No measurement is registered under the requested name.
    #[error("unknown measurement: {name}. Use: {available}")]
    UnknownMeasurement {
        /// The measurement name that was requested.
        name: String,
        /// Comma-separated list of registered names.
        available: String,
    },

    /// A named argument does not match any declared parameter.
    #[error("{measurement} has no parameter named {param}")]
    UnknownParameter {
        /// Measurement being invoked.
        measurement: String,
        /// The unrecognised parameter name.
        param: String,
    },

    /// More positional arguments were supplied than parameters declared.
    #[error("{measurement} takes {expected} parameter(s) but {given} were given")]
    TooManyArguments {
        /// Measurement being invoked.
        measurement: String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of positional arguments after the text.
        given: usize,
    },

    /// A parameter received a value of the wrong kind or out of range.
    #[error("invalid value for {param}: {reason}")]
    InvalidParameter {
        /// The parameter name.
        param: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// The document's model could not be loaded.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias using [`MeasureError`].
pub type MeasureResult<T> = Result<T, MeasureError>;
