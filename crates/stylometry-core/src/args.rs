//! Call arguments and parameter binding for registered measurements.
//!
//! Every measurement takes the text first and named numeric parameters
//! after it. [`Arguments`] carries a call in that loose shape (positional
//! and named values) and [`Arguments::resolve`] normalizes it:
//!
//! - a named `text` argument wins; otherwise the first positional argument
//!   is the text and the remaining positionals shift left by one,
//! - with no text at all the call fails with [`MeasureError::MissingText`],
//! - the rest bind to the measurement's declared [`Param`]s, positionally
//!   in declaration order, then by name, then from defaults.

use std::borrow::Cow;

use serde::Serialize;

use crate::document::{Document, TextInput};
use crate::error::{MeasureError, MeasureResult};

/// A declared parameter and its default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param {
    /// Parameter name, as used in named arguments.
    pub name: &'static str,
    /// Default value; its variant is also the parameter's type.
    pub default: ParamValue,
    /// One-line description.
    pub description: &'static str,
}

impl Param {
    /// Declare a parameter.
    pub const fn new(name: &'static str, default: ParamValue, description: &'static str) -> Self {
        Self {
            name,
            default,
            description,
        }
    }
}

/// A bound parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A non-negative integer (lengths, intervals).
    Count(usize),
    /// A real number (log bases, exponents).
    Real(f64),
    /// A switch.
    Flag(bool),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Real(x) => write!(f, "{x}"),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// One argument of a call.
#[derive(Debug, Clone)]
pub enum Argument<'a> {
    /// Raw text.
    Text(Cow<'a, str>),
    /// A prepared document.
    Document(&'a Document),
    /// A number.
    Number(f64),
    /// A switch.
    Flag(bool),
}

impl<'a> From<&'a str> for Argument<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Argument<'_> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl<'a> From<&'a Document> for Argument<'a> {
    fn from(document: &'a Document) -> Self {
        Self::Document(document)
    }
}

impl<'a> From<TextInput<'a>> for Argument<'a> {
    fn from(input: TextInput<'a>) -> Self {
        match input {
            TextInput::Raw(text) => Self::Text(text),
            TextInput::Document(document) => Self::Document(document),
        }
    }
}

impl From<f64> for Argument<'_> {
    fn from(x: f64) -> Self {
        Self::Number(x)
    }
}

impl From<usize> for Argument<'_> {
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Argument<'_> {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Positional and named arguments of one call.
#[derive(Debug, Clone, Default)]
pub struct Arguments<'a> {
    positional: Vec<Argument<'a>>,
    named: Vec<(String, Argument<'a>)>,
}

impl<'a> Arguments<'a> {
    /// An empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments with `input` as the first positional argument.
    pub fn with_text(input: impl Into<TextInput<'a>>) -> Self {
        Self::new().arg(Argument::from(input.into()))
    }

    /// Append a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Argument<'a>>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a named argument. A later value for the same name replaces the
    /// earlier one.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Argument<'a>>) -> Self {
        let name = name.into();
        self.named.retain(|(existing, _)| *existing != name);
        self.named.push((name, value.into()));
        self
    }

    /// Split the call into its text and parameter arguments.
    pub fn resolve(mut self) -> MeasureResult<(TextInput<'a>, Self)> {
        let text = match self.named.iter().position(|(name, _)| name == "text") {
            Some(idx) => self.named.remove(idx).1,
            None if !self.positional.is_empty() => self.positional.remove(0),
            None => return Err(MeasureError::MissingText),
        };

        let input = match text {
            Argument::Text(text) => TextInput::Raw(text),
            Argument::Document(document) => TextInput::Document(document),
            Argument::Number(_) | Argument::Flag(_) => {
                return Err(MeasureError::InvalidParameter {
                    param: "text".to_string(),
                    reason: "expected text or a document".to_string(),
                });
            }
        };
        Ok((input, self))
    }

    /// Bind the remaining arguments to `params`.
    pub fn bind(mut self, measurement: &str, params: &[Param]) -> MeasureResult<Params> {
        if self.positional.len() > params.len() {
            return Err(MeasureError::TooManyArguments {
                measurement: measurement.to_string(),
                expected: params.len(),
                given: self.positional.len(),
            });
        }

        let mut positional = self.positional.into_iter();
        let mut values = Vec::with_capacity(params.len());
        for param in params {
            let by_position = positional.next();
            let by_name = self
                .named
                .iter()
                .position(|(name, _)| name == param.name)
                .map(|idx| self.named.remove(idx).1);

            let value = match (by_position, by_name) {
                (Some(_), Some(_)) => {
                    return Err(MeasureError::InvalidParameter {
                        param: param.name.to_string(),
                        reason: "given both positionally and by name".to_string(),
                    });
                }
                (Some(arg), None) | (None, Some(arg)) => coerce(param, arg)?,
                (None, None) => param.default,
            };
            values.push((param.name, value));
        }

        if let Some((name, _)) = self.named.first() {
            return Err(MeasureError::UnknownParameter {
                measurement: measurement.to_string(),
                param: name.clone(),
            });
        }

        Ok(Params { values })
    }
}

/// Convert an argument to the type of `param`'s default.
fn coerce(param: &Param, arg: Argument<'_>) -> MeasureResult<ParamValue> {
    let invalid = |reason: &str| MeasureError::InvalidParameter {
        param: param.name.to_string(),
        reason: reason.to_string(),
    };

    match (param.default, arg) {
        (ParamValue::Count(_), Argument::Number(x)) => {
            if x >= 0.0 && x.fract() == 0.0 && x <= usize::MAX as f64 {
                Ok(ParamValue::Count(x as usize))
            } else {
                Err(invalid("expected a non-negative integer"))
            }
        }
        (ParamValue::Real(_), Argument::Number(x)) => Ok(ParamValue::Real(x)),
        (ParamValue::Flag(_), Argument::Flag(b)) => Ok(ParamValue::Flag(b)),
        (ParamValue::Count(_), _) => Err(invalid("expected a non-negative integer")),
        (ParamValue::Real(_), _) => Err(invalid("expected a number")),
        (ParamValue::Flag(_), _) => Err(invalid("expected true or false")),
    }
}

/// Parameter values bound for one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: Vec<(&'static str, ParamValue)>,
}

impl Params {
    /// Bound values in declaration order.
    pub fn values(&self) -> &[(&'static str, ParamValue)] {
        &self.values
    }

    fn get(&self, name: &str) -> MeasureResult<ParamValue> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .ok_or_else(|| MeasureError::InvalidParameter {
                param: name.to_string(),
                reason: "parameter was not bound".to_string(),
            })
    }

    /// An integer parameter.
    pub fn count(&self, name: &str) -> MeasureResult<usize> {
        match self.get(name)? {
            ParamValue::Count(n) => Ok(n),
            _ => Err(MeasureError::InvalidParameter {
                param: name.to_string(),
                reason: "not an integer parameter".to_string(),
            }),
        }
    }

    /// A real parameter. Integer parameters are widened.
    pub fn real(&self, name: &str) -> MeasureResult<f64> {
        match self.get(name)? {
            ParamValue::Real(x) => Ok(x),
            ParamValue::Count(n) => Ok(n as f64),
            ParamValue::Flag(_) => Err(MeasureError::InvalidParameter {
                param: name.to_string(),
                reason: "not a numeric parameter".to_string(),
            }),
        }
    }

    /// A flag parameter.
    pub fn flag(&self, name: &str) -> MeasureResult<bool> {
        match self.get(name)? {
            ParamValue::Flag(b) => Ok(b),
            _ => Err(MeasureError::InvalidParameter {
                param: name.to_string(),
                reason: "not a flag parameter".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: &[Param] = &[
        Param::new("min_length", ParamValue::Count(1), "lower bound"),
        Param::new("max_length", ParamValue::Count(100), "upper bound"),
        Param::new("exclude_combining", ParamValue::Flag(true), "skip marks"),
    ];

    fn raw(input: &TextInput<'_>) -> String {
        match input {
            TextInput::Raw(text) => text.to_string(),
            TextInput::Document(doc) => doc.text().to_string(),
        }
    }

    #[test]
    fn first_positional_is_the_text() {
        let (input, rest) = Arguments::new().arg("hello").arg(3usize).resolve().unwrap();
        assert_eq!(raw(&input), "hello");
        let params = rest.bind("m", PARAMS).unwrap();
        assert_eq!(params.count("min_length").unwrap(), 3);
        assert_eq!(params.count("max_length").unwrap(), 100);
        assert!(params.flag("exclude_combining").unwrap());
    }

    #[test]
    fn named_text_leaves_positionals_alone() {
        let (input, rest) = Arguments::new()
            .arg(2usize)
            .arg(10usize)
            .named("text", "named text")
            .resolve()
            .unwrap();
        assert_eq!(raw(&input), "named text");
        let params = rest.bind("m", PARAMS).unwrap();
        assert_eq!(params.count("min_length").unwrap(), 2);
        assert_eq!(params.count("max_length").unwrap(), 10);
    }

    #[test]
    fn documents_pass_through() {
        let doc = Document::new("prepared").unwrap();
        let (input, _) = Arguments::with_text(&doc).resolve().unwrap();
        assert!(matches!(input, TextInput::Document(d) if std::ptr::eq(d, &doc)));
    }

    #[test]
    fn missing_text_fails_fast() {
        assert_eq!(Arguments::new().resolve().unwrap_err(), MeasureError::MissingText);
        let err = Arguments::new()
            .named("min_length", 2usize)
            .resolve()
            .unwrap_err();
        assert_eq!(err, MeasureError::MissingText);
    }

    #[test]
    fn numbers_are_not_text() {
        let err = Arguments::new().arg(5usize).resolve().unwrap_err();
        assert!(matches!(err, MeasureError::InvalidParameter { ref param, .. } if param == "text"));
    }

    #[test]
    fn named_parameters_bind_by_name() {
        let (_, rest) = Arguments::with_text("t")
            .named("exclude_combining", false)
            .resolve()
            .unwrap();
        let params = rest.bind("m", PARAMS).unwrap();
        assert!(!params.flag("exclude_combining").unwrap());
    }

    #[test]
    fn binding_errors() {
        let (_, rest) = Arguments::with_text("t").named("bogus", 1usize).resolve().unwrap();
        assert!(matches!(
            rest.bind("m", PARAMS),
            Err(MeasureError::UnknownParameter { .. })
        ));

        let (_, rest) = Arguments::with_text("t")
            .arg(1usize)
            .arg(2usize)
            .arg(true)
            .arg(4usize)
            .resolve()
            .unwrap();
        assert!(matches!(
            rest.bind("m", PARAMS),
            Err(MeasureError::TooManyArguments { expected: 3, given: 4, .. })
        ));

        let (_, rest) = Arguments::with_text("t")
            .arg(1usize)
            .named("min_length", 2usize)
            .resolve()
            .unwrap();
        assert!(rest.bind("m", PARAMS).is_err());

        let (_, rest) = Arguments::with_text("t").arg(1.5).resolve().unwrap();
        assert!(rest.bind("m", PARAMS).is_err());

        let (_, rest) = Arguments::with_text("t").arg(-1.0).resolve().unwrap();
        assert!(rest.bind("m", PARAMS).is_err());
    }

    #[test]
    fn counts_widen_to_reals() {
        let params = Arguments::new()
            .bind("m", &[Param::new("base", ParamValue::Real(10.0), "log base")])
            .unwrap();
        assert_eq!(params.real("base").unwrap(), 10.0);
    }
}
