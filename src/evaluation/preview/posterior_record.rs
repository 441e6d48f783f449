use crate::core::FeatureId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// One emitted update: the posterior for `feature` after chunk `chunk_index`.
///
/// Emitted once per (feature, chunk >= 2) pair, in chunk order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorRecord {
    pub chunk_index: u64,
    pub feature: FeatureId,
    pub posterior_mean: f64,
    pub posterior_variance: f64,
    /// Variance plugged into the update (the prior's own when falling back).
    pub likelihood_variance: f64,
    pub used_prior_fallback: bool,
    pub cumulative_true_mean: f64,
}

impl Display for PosteriorRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "chunk={}, feature={}, post_mean={:.6}, post_var={:.6}, true_mean={:.6}{}",
            self.chunk_index,
            self.feature,
            self.posterior_mean,
            self.posterior_variance,
            self.cumulative_true_mean,
            if self.used_prior_fallback {
                " (prior variance fallback)"
            } else {
                ""
            }
        )
    }
}
