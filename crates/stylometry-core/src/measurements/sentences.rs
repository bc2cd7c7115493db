//! Sentence lengths, in words and in characters.
//!
//! Character lengths ignore the sentence's closing terminator run and a
//! leading `¿`/`¡`; see [`sentence_length_in_characters`]. Character
//! distributions group lengths into buckets with [`character_bucket`].

use crate::args::{Param, ParamValue, Params};
use crate::classify::sentence_length_in_characters;
use crate::distribution::{Distribution, RangeDistribution};
use crate::document::Document;
use crate::error::{MeasureError, MeasureResult};
use crate::registry::Measurement;
use crate::value::Value;

use super::{finite, nonzero};

const EXCLUDE_COMBINING: Param = Param::new(
    "exclude_combining",
    ParamValue::Flag(true),
    "do not count combining diacritics",
);

/// Registered sentence measurements.
pub const MEASUREMENTS: &[Measurement] = &[
    Measurement::new(
        "average_sentence_length_in_words",
        "Total words divided by total sentences",
        &[],
        measure_average_sentence_length_in_words,
    ),
    Measurement::new(
        "sentence_length_in_words_distribution",
        "Share of sentences per word length, for lengths in [min_length, max_length)",
        &[
            Param::new("min_length", ParamValue::Count(1), "shortest length counted"),
            Param::new("max_length", ParamValue::Count(100), "first length not counted"),
        ],
        measure_sentence_length_in_words_distribution,
    ),
    Measurement::new(
        "average_sentence_length_in_characters",
        "Mean sentence length in characters, terminators excluded",
        &[EXCLUDE_COMBINING],
        measure_average_sentence_length_in_characters,
    ),
    Measurement::new(
        "sentence_length_in_characters_distribution",
        "Share of sentences per character-length bucket of width interval",
        &[
            Param::new("min_length", ParamValue::Count(1), "shortest length counted"),
            Param::new("max_length", ParamValue::Count(100_000), "first length not counted"),
            Param::new("interval", ParamValue::Count(1), "bucket width"),
            EXCLUDE_COMBINING,
        ],
        measure_sentence_length_in_characters_distribution,
    ),
];

/// Total words divided by total sentences.
pub fn average_sentence_length_in_words(document: &Document) -> MeasureResult<f64> {
    const NAME: &str = "average_sentence_length_in_words";
    let sentences = nonzero(NAME, "no sentences", document.sentences().len())?;
    let words: usize = document.sentences().map(|s| s.word_count()).sum();
    finite(NAME, "no sentences", words as f64 / sentences as f64)
}

/// Distribution of sentence lengths in words, over `[min_length, max_length)`.
pub fn sentence_length_in_words_distribution(
    document: &Document,
    min_length: usize,
    max_length: usize,
) -> Distribution {
    Distribution::from_observations(
        document
            .sentences()
            .map(|s| s.word_count())
            .filter(|len| (min_length..max_length).contains(len)),
    )
}

/// Mean sentence length in characters.
pub fn average_sentence_length_in_characters(
    document: &Document,
    exclude_combining: bool,
) -> MeasureResult<f64> {
    const NAME: &str = "average_sentence_length_in_characters";
    let sentences = nonzero(NAME, "no sentences", document.sentences().len())?;
    let mut total = 0usize;
    for sentence in document.sentences() {
        total += sentence_length_in_characters(sentence.text(), exclude_combining)?;
    }
    finite(NAME, "no sentences", total as f64 / sentences as f64)
}

/// Distribution of sentence lengths in characters over `[min_length,
/// max_length)`, grouped into buckets `interval` wide.
///
/// With an interval of 10, lengths 0 to 9 fall in `(1, 10)` and lengths 10
/// to 19 in `(11, 20)`; see [`character_bucket`].
pub fn sentence_length_in_characters_distribution(
    document: &Document,
    min_length: usize,
    max_length: usize,
    interval: usize,
    exclude_combining: bool,
) -> MeasureResult<RangeDistribution> {
    if interval == 0 {
        return Err(MeasureError::InvalidParameter {
            param: "interval".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let mut buckets = Vec::with_capacity(document.sentences().len());
    for sentence in document.sentences() {
        let length = sentence_length_in_characters(sentence.text(), exclude_combining)?;
        if (min_length..max_length).contains(&length) {
            buckets.push(character_bucket(length, interval));
        }
    }
    Ok(RangeDistribution::from_observations(buckets))
}

/// The `(low, high)` bucket of width `interval` for `length`:
/// `low = floor(length / interval) * interval + 1` and
/// `high = (floor(length / interval) + 1) * interval`.
///
/// The bounds are one above the half-open range `[k * interval, (k + 1) *
/// interval)` the length falls in, so a bucket holds `length + 1`, not
/// `length` itself. `interval` must be at least 1.
///
/// ```
/// use stylometry_core::measurements::sentences::character_bucket;
///
/// assert_eq!(character_bucket(49, 5), (46, 50));
/// assert_eq!(character_bucket(50, 5), (51, 55));
/// assert_eq!(character_bucket(90, 1), (91, 91));
/// ```
pub const fn character_bucket(length: usize, interval: usize) -> (usize, usize) {
    let k = length / interval;
    (k * interval + 1, (k + 1) * interval)
}

fn measure_average_sentence_length_in_words(document: &Document, _: &Params) -> MeasureResult<Value> {
    average_sentence_length_in_words(document).map(Value::from)
}

fn measure_sentence_length_in_words_distribution(
    document: &Document,
    params: &Params,
) -> MeasureResult<Value> {
    Ok(sentence_length_in_words_distribution(
        document,
        params.count("min_length")?,
        params.count("max_length")?,
    )
    .into())
}

fn measure_average_sentence_length_in_characters(
    document: &Document,
    params: &Params,
) -> MeasureResult<Value> {
    average_sentence_length_in_characters(document, params.flag("exclude_combining")?).map(Value::from)
}

fn measure_sentence_length_in_characters_distribution(
    document: &Document,
    params: &Params,
) -> MeasureResult<Value> {
    sentence_length_in_characters_distribution(
        document,
        params.count("min_length")?,
        params.count("max_length")?,
        params.count("interval")?,
        params.flag("exclude_combining")?,
    )
    .map(Value::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Greek in NFD: breathings, accents and iota subscript are separate marks
    const GREEK: &str = concat!(
        "\u{3b5}\u{313}\u{3bd} ",
        "\u{3b1}\u{313}\u{3c1}\u{3c7}\u{3b7}\u{342}\u{345} ",
        "\u{3b5}\u{313}\u{3c0}\u{3bf}\u{3b9}\u{301}\u{3b7}\u{3c3}\u{3b5}\u{3bd}.",
    );

    // Hebrew with niqqud and no closing terminator
    const HEBREW: &str = concat!(
        "\u{5d1}\u{5bc}\u{5b0}\u{5e8}\u{5b5}\u{5d0}\u{5e9}\u{5c1}\u{5b4}\u{5d9}\u{5ea}, ",
        "\u{5d1}\u{5bc}\u{5b8}\u{5e8}\u{5b8}\u{5d0} ",
        "\u{5d0}\u{5b1}\u{5dc}\u{5b9}\u{5d4}\u{5b4}\u{5d9}\u{5dd}, ",
        "\u{5d0}\u{5b5}\u{5ea} ",
        "\u{5d4}\u{5b7}\u{5e9}\u{5bc}\u{5c1}\u{5b8}\u{5de}\u{5b7}\u{5d9}\u{5b4}\u{5dd}",
    );

    fn three_sentences() -> String {
        format!("This is the first sentence. This is another sentence. {GREEK}")
    }

    fn multi_script() -> String {
        format!(
            "This is a very, very, very long sentence that is being used to test sentence \
             distributions. Here's another sentence that is also pretty long.  This is short. \
             This too. I. That was a really short sentence. Here is one more sentence. \
             {GREEK}  {HEBREW}"
        )
    }

    fn doc(text: &str) -> Document {
        Document::new(text).unwrap()
    }

    fn triples(dist: &RangeDistribution) -> Vec<(usize, usize, f64)> {
        dist.buckets()
            .iter()
            .map(|b| (b.low, b.high, b.probability))
            .collect()
    }

    #[test]
    fn average_length_in_words() {
        assert_eq!(average_sentence_length_in_words(&doc(&three_sentences())).unwrap(), 4.0);
    }

    #[test]
    fn words_distribution_keeps_encounter_order() {
        let dist = sentence_length_in_words_distribution(&doc(&three_sentences()), 1, 100);
        let third = 1.0 / 3.0;
        let pairs: Vec<(usize, f64)> = dist.buckets().iter().map(|b| (b.value, b.probability)).collect();
        assert_eq!(pairs, vec![(5, third), (4, third), (3, third)]);
        assert!((dist.total_probability() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn words_distribution_filters_before_normalizing() {
        let dist = sentence_length_in_words_distribution(&doc(&three_sentences()), 4, 100);
        assert_eq!(dist.probability(5), Some(0.5));
        assert_eq!(dist.probability(4), Some(0.5));
        assert_eq!(dist.probability(3), None);
    }

    #[test]
    fn no_sentences_is_degenerate() {
        let empty = doc("");
        assert!(matches!(
            average_sentence_length_in_words(&empty),
            Err(MeasureError::Degenerate { .. })
        ));
        assert!(matches!(
            average_sentence_length_in_characters(&empty, true),
            Err(MeasureError::Degenerate { .. })
        ));
        assert!(sentence_length_in_words_distribution(&empty, 1, 100).is_empty());
        assert!(
            sentence_length_in_characters_distribution(&empty, 1, 100, 1, true)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn average_length_in_characters_over_scripts() {
        // 26 + 24 + 16, or 26 + 24 + 22 with the Greek marks
        let d = doc(&three_sentences());
        assert_eq!(d.sentences().len(), 3);
        assert_eq!(average_sentence_length_in_characters(&d, true).unwrap(), 22.0);
        assert_eq!(average_sentence_length_in_characters(&d, false).unwrap(), 24.0);
    }

    #[test]
    fn average_length_in_characters() {
        // 9 + 18 + 4
        let d = doc("Short one. This one is longer. Tiny.");
        let avg = average_sentence_length_in_characters(&d, true).unwrap();
        assert!((avg - 31.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn character_length_ignores_terminator_runs() {
        for text in ["This is a test.", "This is a test!!!", "This is a test?"] {
            assert_eq!(average_sentence_length_in_characters(&doc(text), true).unwrap(), 14.0);
        }
    }

    #[test]
    fn character_length_combining_toggle() {
        let d = doc("Un cafe\u{301}.");
        assert_eq!(average_sentence_length_in_characters(&d, true).unwrap(), 7.0);
        assert_eq!(average_sentence_length_in_characters(&d, false).unwrap(), 8.0);
    }

    #[test]
    fn characters_distribution_unit_interval() {
        let d = doc("Short one. This one is longer. Tiny.");
        let dist = sentence_length_in_characters_distribution(&d, 1, 1000, 1, true).unwrap();
        let third = 1.0 / 3.0;
        assert_eq!(triples(&dist), vec![(10, 10, third), (19, 19, third), (5, 5, third)]);
    }

    #[test]
    fn characters_distribution_wide_buckets() {
        let d = doc("Go. Stop. This one is longer. Abcdefghij.");
        let dist = sentence_length_in_characters_distribution(&d, 1, 1000, 10, true).unwrap();
        // 2 and 4 below 10, 18 and 10 from 10 up
        assert_eq!(triples(&dist), vec![(1, 10, 0.5), (11, 20, 0.5)]);
    }

    #[test]
    fn characters_distribution_filters_then_buckets() {
        let d = doc("Short one. This one is longer. Tiny.");
        let dist = sentence_length_in_characters_distribution(&d, 5, 20, 5, true).unwrap();
        assert_eq!(triples(&dist), vec![(6, 10, 0.5), (16, 20, 0.5)]);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = sentence_length_in_characters_distribution(&doc("A b."), 1, 10, 0, true).unwrap_err();
        assert!(matches!(err, MeasureError::InvalidParameter { ref param, .. } if param == "interval"));
    }

    #[test]
    fn bucket_bounds_follow_the_floor_formula() {
        assert_eq!(character_bucket(0, 1), (1, 1));
        assert_eq!(character_bucket(0, 10), (1, 10));
        assert_eq!(character_bucket(1, 1), (2, 2));
        assert_eq!(character_bucket(9, 10), (1, 10));
        assert_eq!(character_bucket(10, 10), (11, 20));
        assert_eq!(character_bucket(25, 5), (26, 30));
        assert_eq!(character_bucket(27, 5), (26, 30));
        for length in 0..200 {
            for interval in 1..12 {
                let (low, high) = character_bucket(length, interval);
                assert_eq!(low, length / interval * interval + 1);
                assert_eq!(high - low + 1, interval);
                assert!(low <= length + 1 && length + 1 <= high);
            }
        }
    }

    #[test]
    fn multi_script_sentences() {
        let d = doc(&multi_script());
        let lengths: Vec<usize> = d
            .sentences()
            .map(|s| sentence_length_in_characters(s.text(), true).unwrap())
            .collect();
        assert_eq!(lengths, vec![90, 48, 13, 8, 1, 32, 25, 16, 27]);

        let with_marks: Vec<usize> = d
            .sentences()
            .map(|s| sentence_length_in_characters(s.text(), false).unwrap())
            .collect();
        assert_eq!(with_marks, vec![90, 48, 13, 8, 1, 32, 25, 22, 45]);

        assert_eq!(average_sentence_length_in_characters(&d, true).unwrap(), 260.0 / 9.0);
        assert_eq!(average_sentence_length_in_characters(&d, false).unwrap(), 284.0 / 9.0);
    }

    #[test]
    fn multi_script_unit_buckets() {
        let d = doc(&multi_script());
        let ninth = 1.0 / 9.0;

        let dist = sentence_length_in_characters_distribution(&d, 1, 100_000, 1, true).unwrap();
        let expected: Vec<(usize, usize, f64)> = [91, 49, 14, 9, 2, 33, 26, 17, 28]
            .into_iter()
            .map(|b| (b, b, ninth))
            .collect();
        assert_eq!(triples(&dist), expected);

        let dist = sentence_length_in_characters_distribution(&d, 1, 100_000, 1, false).unwrap();
        let tail: Vec<(usize, usize)> = dist.buckets()[7..].iter().map(|b| (b.low, b.high)).collect();
        assert_eq!(tail, vec![(23, 23), (46, 46)]);
    }

    #[test]
    fn multi_script_wide_buckets() {
        let d = doc(&multi_script());
        let ninth = 1.0 / 9.0;

        let dist = sentence_length_in_characters_distribution(&d, 1, 100_000, 5, true).unwrap();
        assert_eq!(
            triples(&dist),
            vec![
                (91, 95, ninth),
                (46, 50, ninth),
                (11, 15, ninth),
                (6, 10, ninth),
                (1, 5, ninth),
                (31, 35, ninth),
                (26, 30, 2.0 / 9.0),
                (16, 20, ninth),
            ]
        );
        assert!((dist.total_probability() - 1.0).abs() < 1e-12);

        let dist = sentence_length_in_characters_distribution(&d, 10, 20, 2, true).unwrap();
        assert_eq!(triples(&dist), vec![(13, 14, 0.5), (17, 18, 0.5)]);
    }
}
