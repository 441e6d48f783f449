use crate::core::chunks::ChunkSummary;
use crate::core::errors::ContractViolation;
use crate::inference::PosteriorBelief;

/// One Gaussian-Gaussian conjugate step on the mean, with the likelihood
/// variance treated as known.
///
/// ```text
/// post_var  = 1 / (1/prior_var + n/lik_var)
/// post_mean = post_var * (prior_mean/prior_var + n*chunk_mean/lik_var)
/// ```
pub fn conjugate_update(
    prior: &PosteriorBelief,
    chunk_mean: f64,
    chunk_count: u64,
    likelihood_variance: f64,
) -> Result<PosteriorBelief, ContractViolation> {
    if chunk_count == 0 {
        return Err(ContractViolation::EmptyChunk);
    }
    if !prior.variance().is_finite() || prior.variance() <= 0.0 {
        return Err(ContractViolation::InvalidPriorVariance(prior.variance()));
    }
    if !likelihood_variance.is_finite() || likelihood_variance <= 0.0 {
        return Err(ContractViolation::InvalidLikelihoodVariance(
            likelihood_variance,
        ));
    }
    if !chunk_mean.is_finite() {
        return Err(ContractViolation::InvalidChunk(format!(
            "chunk mean must be finite, got {chunk_mean}"
        )));
    }

    let n = chunk_count as f64;
    let prior_precision = 1.0 / prior.variance();
    let data_precision = n / likelihood_variance;

    let variance = 1.0 / (prior_precision + data_precision);
    let mean = variance * (prior.mean() * prior_precision + n * chunk_mean / likelihood_variance);

    PosteriorBelief::new(mean, variance)
}

/// Lifecycle position of a [`SequentialPosteriorUpdater`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdaterState {
    Uninitialized,
    HasEmpiricalPrior,
    Updated { steps: u64 },
}

/// Rolling belief for one feature: `Uninitialized → HasEmpiricalPrior → Updated*`.
#[derive(Debug, Clone, Default)]
pub struct SequentialPosteriorUpdater {
    belief: Option<PosteriorBelief>,
    steps: u64,
}

impl SequentialPosteriorUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the empirical prior from the first chunk.
    pub fn initialize(&mut self, first: &ChunkSummary) -> Result<PosteriorBelief, ContractViolation> {
        if self.belief.is_some() {
            return Err(ContractViolation::AlreadyInitialized);
        }
        let prior = PosteriorBelief::empirical(first)?;
        self.belief = Some(prior);
        Ok(prior)
    }

    /// Replaces the current belief with its conjugate posterior.
    pub fn update(
        &mut self,
        chunk_mean: f64,
        chunk_count: u64,
        likelihood_variance: f64,
    ) -> Result<PosteriorBelief, ContractViolation> {
        let prior = self.belief.ok_or(ContractViolation::NotInitialized)?;
        let posterior = conjugate_update(&prior, chunk_mean, chunk_count, likelihood_variance)?;
        self.belief = Some(posterior);
        self.steps += 1;
        Ok(posterior)
    }

    pub fn belief(&self) -> Option<PosteriorBelief> {
        self.belief
    }

    pub fn state(&self) -> UpdaterState {
        match (self.belief, self.steps) {
            (None, _) => UpdaterState::Uninitialized,
            (Some(_), 0) => UpdaterState::HasEmpiricalPrior,
            (Some(_), steps) => UpdaterState::Updated { steps },
        }
    }
}
