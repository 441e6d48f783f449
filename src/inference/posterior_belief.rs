use crate::core::chunks::ChunkSummary;
use crate::core::errors::ContractViolation;
use serde::{Deserialize, Serialize};

/// Gaussian belief over a feature's mean: N(mean, variance).
///
/// Never mutated in place; each update produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PosteriorBelief {
    mean: f64,
    variance: f64,
}

impl PosteriorBelief {
    pub fn new(mean: f64, variance: f64) -> Result<Self, ContractViolation> {
        if !mean.is_finite() {
            return Err(ContractViolation::InvalidChunk(format!(
                "belief mean must be finite, got {mean}"
            )));
        }
        if !variance.is_finite() || variance <= 0.0 {
            return Err(ContractViolation::InvalidPriorVariance(variance));
        }
        Ok(Self { mean, variance })
    }

    /// Empirical-Bayes prior: the first chunk's mean and sample variance.
    pub fn empirical(first: &ChunkSummary) -> Result<Self, ContractViolation> {
        if first.count() < 2 {
            return Err(ContractViolation::InsufficientFirstChunk {
                count: first.count(),
            });
        }
        let variance = first
            .sample_variance()
            .ok_or(ContractViolation::InsufficientFirstChunk {
                count: first.count(),
            })?;
        Self::new(first.mean(), variance)
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[inline]
    pub fn variance(&self) -> f64 {
        self.variance
    }

    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Symmetric interval `mean ± z·σ`.
    pub fn credible_interval(&self, z: f64) -> (f64, f64) {
        let half = z.abs() * self.std_dev();
        (self.mean - half, self.mean + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empirical_prior_from_worked_example() {
        let b = PosteriorBelief::empirical(&ChunkSummary::from_values(&[10.0, 12.0, 14.0]))
            .unwrap();
        assert_eq!(b.mean(), 12.0);
        assert_eq!(b.variance(), 4.0);
        assert_eq!(b.std_dev(), 2.0);
    }

    #[test]
    fn empirical_prior_needs_two_points_and_spread() {
        assert_eq!(
            PosteriorBelief::empirical(&ChunkSummary::from_values(&[1.0])),
            Err(ContractViolation::InsufficientFirstChunk { count: 1 })
        );
        assert_eq!(
            PosteriorBelief::empirical(&ChunkSummary::from_values(&[3.0, 3.0, 3.0])),
            Err(ContractViolation::InvalidPriorVariance(0.0))
        );
    }

    #[test]
    fn credible_interval_is_symmetric() {
        let b = PosteriorBelief::new(5.0, 4.0).unwrap();
        let (lo, hi) = b.credible_interval(3.0);
        assert_eq!((lo, hi), (-1.0, 11.0));
        assert_eq!(b.credible_interval(-3.0), (lo, hi));
    }

    #[test]
    fn new_rejects_degenerate_variance() {
        assert!(matches!(
            PosteriorBelief::new(0.0, 0.0),
            Err(ContractViolation::InvalidPriorVariance(_))
        ));
        assert!(matches!(
            PosteriorBelief::new(0.0, f64::INFINITY),
            Err(ContractViolation::InvalidPriorVariance(_))
        ));
        assert!(PosteriorBelief::new(f64::NAN, 1.0).is_err());
    }
}
