//! Word counts and word lengths.

use crate::args::{Param, ParamValue, Params};
use crate::classify::word_length;
use crate::distribution::Distribution;
use crate::document::Document;
use crate::error::MeasureResult;
use crate::registry::Measurement;
use crate::value::Value;

const EXCLUDE_COMBINING: Param = Param::new(
    "exclude_combining",
    ParamValue::Flag(true),
    "do not count combining diacritics",
);

/// Registered word measurements.
pub const MEASUREMENTS: &[Measurement] = &[
    Measurement::new("word_count", "Total number of words", &[], measure_word_count),
    Measurement::new(
        "average_word_length",
        "Mean word length in letters and digits (0 for a text without words)",
        &[EXCLUDE_COMBINING],
        measure_average_word_length,
    ),
    Measurement::new(
        "word_length_distribution",
        "Share of words per length, for lengths in [min_length, max_length)",
        &[
            Param::new("min_length", ParamValue::Count(1), "shortest length counted"),
            Param::new("max_length", ParamValue::Count(100), "first length not counted"),
            EXCLUDE_COMBINING,
        ],
        measure_word_length_distribution,
    ),
];

/// Number of word tokens.
pub fn word_count(document: &Document) -> usize {
    document.words().count()
}

/// Total word length divided by the number of words; 0 when there are none.
pub fn average_word_length(document: &Document, exclude_combining: bool) -> f64 {
    let (total, words) = document
        .words()
        .fold((0usize, 0usize), |(total, words), token| {
            (total + word_length(token.text(), exclude_combining), words + 1)
        });
    if words == 0 {
        return 0.0;
    }
    total as f64 / words as f64
}

/// Distribution of word lengths in `[min_length, max_length)`.
///
/// Probabilities are relative to the words inside the range.
pub fn word_length_distribution(
    document: &Document,
    min_length: usize,
    max_length: usize,
    exclude_combining: bool,
) -> Distribution {
    Distribution::from_observations(
        document
            .words()
            .map(|token| word_length(token.text(), exclude_combining))
            .filter(|len| (min_length..max_length).contains(len)),
    )
}

fn measure_word_count(document: &Document, _: &Params) -> MeasureResult<Value> {
    Ok(word_count(document).into())
}

fn measure_average_word_length(document: &Document, params: &Params) -> MeasureResult<Value> {
    Ok(average_word_length(document, params.flag("exclude_combining")?).into())
}

fn measure_word_length_distribution(document: &Document, params: &Params) -> MeasureResult<Value> {
    Ok(word_length_distribution(
        document,
        params.count("min_length")?,
        params.count("max_length")?,
        params.flag("exclude_combining")?,
    )
    .into())
}
