//! Stylometric measurements.
//!
//! Each function here is pure: it reads a [`Document`](crate::Document)
//! and returns a number or a distribution. The functions can be called
//! directly with typed parameters, or by name through a
//! [`Registry`](crate::Registry), which uses the `MEASUREMENTS` table of
//! each submodule.
//!
//! - [`words`] - word counts and word lengths
//! - [`sentences`] - sentence lengths in words and characters
//! - [`richness`] - vocabulary-richness formulas over the spectrum

pub mod richness;
pub mod sentences;
pub mod words;

use crate::error::{MeasureError, MeasureResult};
use crate::registry::Measurement;

/// Every built-in measurement.
pub fn builtin() -> impl Iterator<Item = &'static Measurement> {
    words::MEASUREMENTS
        .iter()
        .chain(sentences::MEASUREMENTS)
        .chain(richness::MEASUREMENTS)
}

/// Fail when a formula divides by zero or leaves the reals.
fn finite(measurement: &'static str, reason: &'static str, value: f64) -> MeasureResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MeasureError::Degenerate {
            measurement,
            reason,
        })
    }
}

/// Fail when `count` is zero.
const fn nonzero(measurement: &'static str, reason: &'static str, count: usize) -> MeasureResult<usize> {
    if count == 0 {
        Err(MeasureError::Degenerate {
            measurement,
            reason,
        })
    } else {
        Ok(count)
    }
}
