//! Exceedance direction.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DistributionError;
use crate::model::DistributionModel;

/// Which tail counts as "extreme".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Extreme means exceeding the threshold from below: `P(X >= t)`.
    Ascending,
    /// Extreme means falling under the threshold: `P(X <= t)`.
    Descending,
}

impl Direction {
    /// Lower-case name used in configuration files and output.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Ascending => "ascending",
            Direction::Descending => "descending",
        }
    }

    /// Probability of the tail selected by this direction.
    ///
    /// Ascending uses the survival function, descending the CDF. For
    /// continuous families `P(X >= t) = P(X > t)`.
    pub fn tail_probability<M: DistributionModel + ?Sized>(self, model: &M, threshold: f64) -> f64 {
        match self {
            Direction::Ascending => model.sf(threshold),
            Direction::Descending => model.cdf(threshold),
        }
    }

    /// Sorts `values` in place so that the most extreme value comes first.
    pub fn sort_most_extreme_first(self, values: &mut [f64]) {
        match self {
            Direction::Ascending => values.sort_by(|a, b| b.total_cmp(a)),
            Direction::Descending => values.sort_by(f64::total_cmp),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = DistributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascending" => Ok(Direction::Ascending),
            "descending" => Ok(Direction::Descending),
            _ => Err(DistributionError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}
