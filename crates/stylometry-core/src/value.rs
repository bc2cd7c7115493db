//! Uniform measurement results.

use serde::{Deserialize, Serialize};

use crate::distribution::{Distribution, RangeDistribution};

/// The result of a registered measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A count of tokens or sentences.
    Count(usize),
    /// A real-valued statistic.
    Scalar(f64),
    /// A distribution over single values.
    Distribution(Distribution),
    /// A distribution over ranged buckets.
    RangeDistribution(RangeDistribution),
}

impl Value {
    /// The value as a number, for counts and scalars.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Count(n) => Some(*n as f64),
            Self::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// The value as a count.
    pub const fn as_count(&self) -> Option<usize> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a single-value distribution.
    pub const fn as_distribution(&self) -> Option<&Distribution> {
        match self {
            Self::Distribution(d) => Some(d),
            _ => None,
        }
    }

    /// The value as a ranged distribution.
    pub const fn as_range_distribution(&self) -> Option<&RangeDistribution> {
        match self {
            Self::RangeDistribution(d) => Some(d),
            _ => None,
        }
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Count(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Scalar(x)
    }
}

impl From<Distribution> for Value {
    fn from(d: Distribution) -> Self {
        Self::Distribution(d)
    }
}

impl From<RangeDistribution> for Value {
    fn from(d: RangeDistribution) -> Self {
        Self::RangeDistribution(d)
    }
}
