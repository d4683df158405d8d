//! Percentage share of each stat relative to the sum of all four.

use super::stats::{Stat, StatMap, StatSample};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    shares: StatMap<f64>,
    total: u64,
}

impl Distribution {
    /// Shares are rounded to one decimal independently, so their sum may
    /// drift from 100.0 by a few tenths. A zero total yields all-zero
    /// shares and `has_data() == false`.
    pub fn from_sample(sample: &StatSample) -> Self {
        let total = sample.total();
        if total == 0 {
            return Self {
                shares: StatMap::splat(0.0),
                total,
            };
        }
        let denominator = total as f64;
        Self {
            shares: sample.map(|_, value| round_tenth(*value as f64 / denominator * 100.0)),
            total,
        }
    }

    pub fn share(&self, stat: Stat) -> f64 {
        self.shares[stat]
    }

    pub fn shares(&self) -> &StatMap<f64> {
        &self.shares
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// False when every stat read as zero; percentages are meaningless then.
    pub fn has_data(&self) -> bool {
        self.total > 0
    }
}

/// Rounds to one decimal with `f64::round` on the scaled value: exact ties
/// go away from zero (`12.25` becomes `12.3`), never to even.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
