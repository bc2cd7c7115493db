//! Probability distributions over observed values.
//!
//! Buckets keep the order in which values were first encountered, not
//! sorted order, and probabilities are relative to the observations that
//! were actually counted.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// One `(value, probability)` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// The observed value (a length).
    pub value: usize,
    /// Share of observations with this value.
    pub probability: f64,
}

/// One `(low, high, probability)` bucket over an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBucket {
    /// Smallest value in the bucket.
    pub low: usize,
    /// Largest value in the bucket.
    pub high: usize,
    /// Share of observations falling in `low..=high`.
    pub probability: f64,
}

/// Distribution of single values, in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution {
    buckets: Vec<Bucket>,
}

impl Distribution {
    /// Count observations and normalize by their total.
    pub fn from_observations(observations: impl IntoIterator<Item = usize>) -> Self {
        let (tally, total) = tally(observations);
        Self {
            buckets: tally
                .into_iter()
                .map(|(value, count)| Bucket {
                    value,
                    probability: count as f64 / total as f64,
                })
                .collect(),
        }
    }

    /// The buckets, in encounter order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Probability of `value`, if it was observed.
    pub fn probability(&self, value: usize) -> Option<f64> {
        self.buckets
            .iter()
            .find(|b| b.value == value)
            .map(|b| b.probability)
    }

    /// Sum of all probabilities (1.0 unless empty).
    pub fn total_probability(&self) -> f64 {
        self.buckets.iter().map(|b| b.probability).sum()
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Distribution of ranged buckets, in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeDistribution {
    buckets: Vec<RangeBucket>,
}

impl RangeDistribution {
    /// Count `(low, high)` observations and normalize by their total.
    pub fn from_observations(observations: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let (tally, total) = tally(observations);
        Self {
            buckets: tally
                .into_iter()
                .map(|((low, high), count)| RangeBucket {
                    low,
                    high,
                    probability: count as f64 / total as f64,
                })
                .collect(),
        }
    }

    /// The buckets, in encounter order.
    pub fn buckets(&self) -> &[RangeBucket] {
        &self.buckets
    }

    /// Sum of all probabilities (1.0 unless empty).
    pub fn total_probability(&self) -> f64 {
        self.buckets.iter().map(|b| b.probability).sum()
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Count occurrences, keeping first-encounter order.
fn tally<K: Eq + Hash + Copy>(observations: impl IntoIterator<Item = K>) -> (Vec<(K, usize)>, usize) {
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    let mut total = 0;
    for key in observations {
        total += 1;
        match index.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key, 1));
            }
        }
    }
    (counts, total)
}
