//! Deterministic weighted choice by index.

use crate::error::{RangeError, Result, SiftError};

/// A value paired with its relative weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedSample<T> {
    pub weight: u64,
    pub value: T,
}

impl<T> WeightedSample<T> {
    pub fn new(weight: u64, value: T) -> Self {
        WeightedSample { weight, value }
    }
}

/// Maps every index in `[0, total_weight)` to exactly one sample.
///
/// Each sample owns a contiguous run of indices as long as its weight, so a
/// uniformly drawn index selects samples proportionally to their weights.
#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    values: Vec<T>,
    // Exclusive upper index of each sample's run.
    ends: Vec<u64>,
}

impl<T> WeightedSampler<T> {
    /// Build a sampler, failing when there is nothing to choose from.
    pub fn build(samples: Vec<WeightedSample<T>>) -> Result<Self> {
        if samples.is_empty() {
            return Err(SiftError::InvalidGenerator {
                message: "weighted choice requires at least one sample".to_string(),
            });
        }

        let mut total: u64 = 0;
        let mut values = Vec::with_capacity(samples.len());
        let mut ends = Vec::with_capacity(samples.len());
        for sample in samples {
            total = total
                .checked_add(sample.weight)
                .ok_or_else(|| SiftError::InvalidGenerator {
                    message: "total weight overflows u64".to_string(),
                })?;
            values.push(sample.value);
            ends.push(total);
        }

        if total == 0 {
            return Err(SiftError::InvalidGenerator {
                message: "weighted choice requires a positive total weight".to_string(),
            });
        }

        Ok(WeightedSampler { values, ends })
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.ends.last().copied().unwrap_or(0)
    }

    /// The sample whose run contains `index`.
    pub fn sample(&self, index: u64) -> std::result::Result<&T, RangeError> {
        let total = self.total_weight();
        if index >= total {
            return Err(RangeError::Index { index, total });
        }
        let position = self.ends.partition_point(|&end| end <= index);
        self.values
            .get(position)
            .ok_or(RangeError::Index { index, total })
    }
}
