//! Named measurement registry.
//!
//! A [`Registry`] maps stable names to [`Measurement`]s. The built-in
//! registry is populated when it is constructed, so every measurement is
//! discoverable before any of them has been called.

use std::collections::BTreeMap;

use crate::args::{Arguments, Param, Params};
use crate::document::Document;
use crate::error::{MeasureError, MeasureResult};
use crate::measurements;
use crate::value::Value;

/// Entry point of a registered measurement.
pub type MeasureFn = fn(&Document, &Params) -> MeasureResult<Value>;

/// A measurement registered under a name.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    /// Stable name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Declared parameters, in positional order.
    pub params: &'static [Param],
    /// The measurement itself.
    pub function: MeasureFn,
}

impl Measurement {
    /// Describe a measurement.
    pub const fn new(
        name: &'static str,
        description: &'static str,
        params: &'static [Param],
        function: MeasureFn,
    ) -> Self {
        Self {
            name,
            description,
            params,
            function,
        }
    }

    /// Bind `args` to this measurement's parameters.
    pub fn bind(&self, args: Arguments<'_>) -> MeasureResult<Params> {
        args.bind(self.name, self.params)
    }

    /// Run the measurement with already bound parameters.
    #[tracing::instrument(skip_all, fields(measurement = self.name))]
    pub fn call(&self, document: &Document, params: &Params) -> MeasureResult<Value> {
        let value = (self.function)(document, params);
        if let Err(e) = &value {
            tracing::debug!(error = %e, "measurement failed");
        }
        value
    }
}

/// Name → measurement lookup.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<&'static str, Measurement>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in measurement.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for measurement in measurements::builtin() {
            registry.register(*measurement);
        }
        tracing::trace!(count = registry.len(), "built-in measurements registered");
        registry
    }

    /// Register a measurement, returning the one it replaces, if any.
    pub fn register(&mut self, measurement: Measurement) -> Option<Measurement> {
        self.entries.insert(measurement.name, measurement)
    }

    /// Look up a measurement by name.
    pub fn get(&self, name: &str) -> MeasureResult<&Measurement> {
        self.entries
            .get(name)
            .ok_or_else(|| MeasureError::UnknownMeasurement {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Registered measurements, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.entries.values()
    }

    /// Number of registered measurements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ParamValue;

    const BUILTIN_NAMES: &[&str] = &[
        "word_count",
        "average_word_length",
        "word_length_distribution",
        "average_sentence_length_in_words",
        "sentence_length_in_words_distribution",
        "average_sentence_length_in_characters",
        "sentence_length_in_characters_distribution",
        "type_token_ratio",
        "yules_k",
        "guiraud_r",
        "herdan_c",
        "honore_r",
        "sichel_s",
        "summer_s",
        "tuldava_ln",
        "entropy",
        "brunet_w",
    ];

    #[test]
    fn builtin_registers_everything_up_front() {
        let registry = Registry::builtin();
        for name in BUILTIN_NAMES {
            assert!(registry.contains(name), "missing {name}");
        }
        assert_eq!(registry.len(), BUILTIN_NAMES.len());
    }

    #[test]
    fn unknown_name_lists_alternatives() {
        let registry = Registry::builtin();
        let err = registry.get("nope").unwrap_err();
        match err {
            MeasureError::UnknownMeasurement { name, available } => {
                assert_eq!(name, "nope");
                assert!(available.contains("yules_k"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn constant(_: &Document, params: &Params) -> MeasureResult<Value> {
        Ok(Value::Scalar(params.real("k")?))
    }

    #[test]
    fn custom_measurements() {
        const PARAMS: &[Param] = &[Param::new("k", ParamValue::Real(2.5), "the constant")];
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        assert!(
            registry
                .register(Measurement::new("constant", "returns k", PARAMS, constant))
                .is_none()
        );

        let doc = Document::new("anything").unwrap();
        let measurement = registry.get("constant").unwrap();
        let params = measurement.bind(Arguments::new()).unwrap();
        assert_eq!(measurement.call(&doc, &params).unwrap(), Value::Scalar(2.5));

        let params = measurement.bind(Arguments::new().arg(4.0)).unwrap();
        assert_eq!(measurement.call(&doc, &params).unwrap(), Value::Scalar(4.0));
    }
}
