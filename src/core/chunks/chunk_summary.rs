use crate::core::errors::ContractViolation;
use serde::{Deserialize, Serialize};

/// Sufficient statistics of one chunk of observations for a single feature.
///
/// `sum_squared_deviation` is taken around the chunk's *own* mean, which is
/// what the batched Welford combine step expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkSummary {
    count: u64,
    mean: f64,
    sum_squared_deviation: f64,
}

impl ChunkSummary {
    /// Builds a summary from pre-computed statistics.
    ///
    /// Rejects a non-finite mean or a negative / non-finite sum of squared
    /// deviations. An empty summary (`count == 0`) is accepted here; it is
    /// refused later by whichever component tries to absorb it.
    pub fn new(
        count: u64,
        mean: f64,
        sum_squared_deviation: f64,
    ) -> Result<Self, ContractViolation> {
        if count == 0 {
            return Ok(Self::empty());
        }
        if !mean.is_finite() {
            return Err(ContractViolation::InvalidChunk(format!(
                "mean must be finite, got {mean}"
            )));
        }
        if !sum_squared_deviation.is_finite() || sum_squared_deviation < 0.0 {
            return Err(ContractViolation::InvalidChunk(format!(
                "sum of squared deviations must be finite and >= 0, got {sum_squared_deviation}"
            )));
        }
        Ok(Self {
            count,
            mean,
            sum_squared_deviation,
        })
    }

    /// Summarizes raw observations in one Welford pass.
    ///
    /// Non-finite values are treated as missing and skipped.
    pub fn from_values(values: &[f64]) -> Self {
        let mut count = 0u64;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        for &x in values {
            if !x.is_finite() {
                continue;
            }
            count += 1;
            let delta = x - mean;
            mean += delta / count as f64;
            m2 += delta * (x - mean);
        }
        if count == 0 {
            return Self::empty();
        }
        Self {
            count,
            mean,
            sum_squared_deviation: m2.max(0.0),
        }
    }

    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            sum_squared_deviation: 0.0,
        }
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline]
    pub fn sum_squared_deviation(&self) -> f64 {
        self.sum_squared_deviation
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Unbiased variance of the chunk alone; `None` below two observations.
    pub fn sample_variance(&self) -> Option<f64> {
        if self.count > 1 {
            Some(self.sum_squared_deviation / (self.count - 1) as f64)
        } else {
            None
        }
    }
}
