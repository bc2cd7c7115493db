//! Vocabulary richness.
//!
//! Every measure here is a closed-form function of the document's
//! [`VocabularySpectrum`](crate::spectrum::VocabularySpectrum): `N` word
//! tokens, `V` distinct word-forms and `V(i, N)`, the number of forms that
//! occur exactly `i` times. Logarithms take a `base` parameter, natural by
//! default.
//!
//! A formula that would divide by zero or produce a non-finite value fails
//! with [`MeasureError::Degenerate`] instead of returning `NaN` or infinity.

use std::f64::consts::E;

use crate::args::{Param, ParamValue, Params};
use crate::document::Document;
use crate::error::{MeasureError, MeasureResult};
use crate::registry::Measurement;
use crate::value::Value;

use super::{finite, nonzero};

/// Default exponent of Brunet's W.
pub const BRUNET_A: f64 = 0.172;

const BASE: Param = Param::new("base", ParamValue::Real(E), "logarithm base");

/// Registered richness measurements.
pub const MEASUREMENTS: &[Measurement] = &[
    Measurement::new("type_token_ratio", "Type-token ratio V / N", &[], measure_type_token_ratio),
    Measurement::new(
        "yules_k",
        "Yule's K: 10^4 (sum i^2 V(i,N) - N) / N^2",
        &[],
        measure_yules_k,
    ),
    Measurement::new("guiraud_r", "Guiraud's R: V / sqrt(N)", &[], measure_guiraud_r),
    Measurement::new("herdan_c", "Herdan's C: log V / log N", &[BASE], measure_herdan_c),
    Measurement::new(
        "honore_r",
        "Honore's R: 100 log N / (1 - V(1,N) / V)",
        &[BASE],
        measure_honore_r,
    ),
    Measurement::new("sichel_s", "Sichel's S: V(2,N) / V", &[], measure_sichel_s),
    Measurement::new(
        "summer_s",
        "Summer's S: log log V / log log N",
        &[BASE],
        measure_summer_s,
    ),
    Measurement::new(
        "tuldava_ln",
        "Tuldava's LN: (1 - V^2) / (V^2 log N)",
        &[BASE],
        measure_tuldava_ln,
    ),
    Measurement::new(
        "entropy",
        "Entropy of the spectrum: -100 sum p log p",
        &[BASE],
        measure_entropy,
    ),
    Measurement::new(
        "brunet_w",
        "Brunet's W: N^(V^-a)",
        &[Param::new("a", ParamValue::Real(BRUNET_A), "exponent")],
        measure_brunet_w,
    ),
];

/// `(N, V)` as floats, failing when the document has no words.
fn sizes(document: &Document, measurement: &'static str) -> MeasureResult<(f64, f64)> {
    let spectrum = document.spectrum();
    let n = nonzero(measurement, "no words", spectrum.word_count())?;
    Ok((n as f64, spectrum.vocabulary_size() as f64))
}

fn check_base(base: f64) -> MeasureResult<f64> {
    if base.is_finite() && base > 0.0 && base != 1.0 {
        Ok(base)
    } else {
        Err(MeasureError::InvalidParameter {
            param: "base".to_string(),
            reason: format!("{base} is not a valid logarithm base"),
        })
    }
}

/// Type-token ratio: `V / N`.
pub fn type_token_ratio(document: &Document) -> MeasureResult<f64> {
    let (n, v) = sizes(document, "type_token_ratio")?;
    Ok(v / n)
}

/// Yule's characteristic K: `10^4 (Σ i² V(i,N) − N) / N²`.
pub fn yules_k(document: &Document) -> MeasureResult<f64> {
    let (n, _) = sizes(document, "yules_k")?;
    let sum: f64 = document
        .spectrum()
        .spectrum()
        .iter()
        .map(|(&i, &forms)| (i * i * forms) as f64)
        .sum();
    Ok(10_000.0 * (sum - n) / (n * n))
}

/// Guiraud's R: `V / √N`.
pub fn guiraud_r(document: &Document) -> MeasureResult<f64> {
    let (n, v) = sizes(document, "guiraud_r")?;
    Ok(v / n.sqrt())
}

/// Herdan's C: `log V / log N`. Undefined for a single word (`log N = 0`).
pub fn herdan_c(document: &Document, base: f64) -> MeasureResult<f64> {
    let base = check_base(base)?;
    let (n, v) = sizes(document, "herdan_c")?;
    finite("herdan_c", "log N is zero", v.log(base) / n.log(base))
}

/// Honoré's R: `100 log N / (1 − V(1,N) / V)`.
///
/// Undefined when every word-form is a hapax legomenon.
pub fn honore_r(document: &Document, base: f64) -> MeasureResult<f64> {
    let base = check_base(base)?;
    let (n, v) = sizes(document, "honore_r")?;
    let hapaxes = document.spectrum().frequency(1) as f64;
    finite(
        "honore_r",
        "every word-form occurs once",
        100.0 * n.log(base) / (1.0 - hapaxes / v),
    )
}

/// Sichel's S: `V(2,N) / V`, the share of dis legomena.
pub fn sichel_s(document: &Document) -> MeasureResult<f64> {
    let spectrum = document.spectrum();
    let v = nonzero("sichel_s", "no words", spectrum.vocabulary_size())?;
    Ok(spectrum.frequency(2) as f64 / v as f64)
}

/// Summer's S: `log log V / log log N`.
///
/// Needs `log V` and `log N` above zero and `log log N` non-zero.
pub fn summer_s(document: &Document, base: f64) -> MeasureResult<f64> {
    let base = check_base(base)?;
    let (n, v) = sizes(document, "summer_s")?;
    finite(
        "summer_s",
        "log log N is zero or undefined",
        v.log(base).log(base) / n.log(base).log(base),
    )
}

/// Tuldava's LN: `(1 − V²) / (V² log N)`.
pub fn tuldava_ln(document: &Document, base: f64) -> MeasureResult<f64> {
    let base = check_base(base)?;
    let (n, v) = sizes(document, "tuldava_ln")?;
    let v2 = v * v;
    finite("tuldava_ln", "log N is zero", (1.0 - v2) / (v2 * n.log(base)))
}

/// Entropy of the normalized spectrum: `−100 Σ p log p`.
pub fn entropy(document: &Document, base: f64) -> MeasureResult<f64> {
    let base = check_base(base)?;
    let spectrum = document.spectrum();
    nonzero("entropy", "no words", spectrum.vocabulary_size())?;
    let sum: f64 = spectrum
        .probabilities()
        .values()
        .map(|&p| p * p.log(base))
        .sum();
    finite("entropy", "probabilities are not finite", -100.0 * sum)
}

/// Brunet's W: `N^(V^−a)`.
pub fn brunet_w(document: &Document, a: f64) -> MeasureResult<f64> {
    let (n, v) = sizes(document, "brunet_w")?;
    finite("brunet_w", "result overflows", n.powf(v.powf(-a)))
}

fn measure_type_token_ratio(document: &Document, _: &Params) -> MeasureResult<Value> {
    type_token_ratio(document).map(Value::from)
}

fn measure_yules_k(document: &Document, _: &Params) -> MeasureResult<Value> {
    yules_k(document).map(Value::from)
}

fn measure_guiraud_r(document: &Document, _: &Params) -> MeasureResult<Value> {
    guiraud_r(document).map(Value::from)
}

fn measure_herdan_c(document: &Document, params: &Params) -> MeasureResult<Value> {
    herdan_c(document, params.real("base")?).map(Value::from)
}

fn measure_honore_r(document: &Document, params: &Params) -> MeasureResult<Value> {
    honore_r(document, params.real("base")?).map(Value::from)
}

fn measure_sichel_s(document: &Document, _: &Params) -> MeasureResult<Value> {
    sichel_s(document).map(Value::from)
}

fn measure_summer_s(document: &Document, params: &Params) -> MeasureResult<Value> {
    summer_s(document, params.real("base")?).map(Value::from)
}

fn measure_tuldava_ln(document: &Document, params: &Params) -> MeasureResult<Value> {
    tuldava_ln(document, params.real("base")?).map(Value::from)
}

fn measure_entropy(document: &Document, params: &Params) -> MeasureResult<Value> {
    entropy(document, params.real("base")?).map(Value::from)
}

fn measure_brunet_w(document: &Document, params: &Params) -> MeasureResult<Value> {
    brunet_w(document, params.real("a")?).map(Value::from)
}
