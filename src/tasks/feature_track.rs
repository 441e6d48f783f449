use crate::core::chunks::ChunkSummary;
use crate::core::estimators::RunningMomentEstimator;
use crate::core::{ContractViolation, FeatureId};
use crate::evaluation::{Estimator, PosteriorRecord, TrueMeanTracker};
use crate::inference::{PosteriorBelief, SequentialPosteriorUpdater, UpdaterState};
use crate::tasks::UpdateError;

/// Likelihood variance for the next update.
///
/// The running estimate when it exists (`count > 1`), otherwise the prior's
/// own variance. The flag reports whether the fallback was taken.
///
/// A [`FeatureTrack`] never takes the fallback: its first chunk must already
/// hold two distinct values before a prior exists. It fires only for a bare
/// estimator holding at most one observation.
pub fn likelihood_variance_or_prior(
    moments: &RunningMomentEstimator,
    prior: &PosteriorBelief,
) -> (f64, bool) {
    match moments.likelihood_variance() {
        Some(v) => (v, false),
        None => (prior.variance(), true),
    }
}

/// All per-feature state: running moments, rolling belief and the benchmark
/// mean, plus how many chunks have been absorbed.
///
/// Owned by exactly one feature and never shared.
#[derive(Debug, Clone)]
pub struct FeatureTrack {
    feature: FeatureId,
    moments: RunningMomentEstimator,
    posterior: SequentialPosteriorUpdater,
    true_mean: TrueMeanTracker,
    chunks_seen: u64,
}

impl FeatureTrack {
    pub fn new(feature: FeatureId) -> Self {
        Self {
            feature,
            moments: RunningMomentEstimator::new(),
            posterior: SequentialPosteriorUpdater::new(),
            true_mean: TrueMeanTracker::default(),
            chunks_seen: 0,
        }
    }

    /// Computes the state after `chunk` without touching `self`.
    ///
    /// `chunk_index` is 1-based and must be exactly one past the last chunk
    /// absorbed. Chunk 1 seeds both components and emits nothing; every later
    /// chunk emits one record.
    pub fn advance(
        &self,
        chunk_index: u64,
        chunk: &ChunkSummary,
    ) -> Result<(Self, Option<PosteriorRecord>), UpdateError> {
        let mut next = self.clone();
        let record = next
            .apply(chunk_index, chunk)
            .map_err(|source| UpdateError::Contract {
                feature: self.feature.clone(),
                chunk_index,
                source,
            })?;
        Ok((next, record))
    }

    /// [`advance`](Self::advance), committing the new state on success.
    pub fn observe(
        &mut self,
        chunk_index: u64,
        chunk: &ChunkSummary,
    ) -> Result<Option<PosteriorRecord>, UpdateError> {
        let (next, record) = self.advance(chunk_index, chunk)?;
        *self = next;
        Ok(record)
    }

    fn apply(
        &mut self,
        chunk_index: u64,
        chunk: &ChunkSummary,
    ) -> Result<Option<PosteriorRecord>, ContractViolation> {
        let expected = self.chunks_seen + 1;
        if chunk_index != expected {
            return Err(ContractViolation::OutOfOrderChunk {
                expected,
                got: chunk_index,
            });
        }

        if chunk_index == 1 {
            let prior = self.posterior.initialize(chunk)?;
            self.moments.absorb_first(chunk)?;
            self.true_mean.add_chunk(chunk);
            self.chunks_seen = 1;
            tracing::debug!(
                feature = %self.feature,
                prior_mean = prior.mean(),
                prior_variance = prior.variance(),
                "seeded empirical prior"
            );
            return Ok(None);
        }

        let prior = self
            .posterior
            .belief()
            .ok_or(ContractViolation::NotInitialized)?;
        self.moments.absorb_next(chunk)?;

        let (likelihood_variance, used_prior_fallback) =
            likelihood_variance_or_prior(&self.moments, &prior);
        if used_prior_fallback {
            tracing::warn!(
                feature = %self.feature,
                chunk_index,
                "running variance undefined, using prior variance"
            );
        }

        let posterior = self
            .posterior
            .update(chunk.mean(), chunk.count(), likelihood_variance)?;
        self.true_mean.add_chunk(chunk);
        self.chunks_seen = chunk_index;

        tracing::debug!(
            feature = %self.feature,
            chunk_index,
            posterior_mean = posterior.mean(),
            posterior_variance = posterior.variance(),
            likelihood_variance,
            "posterior updated"
        );

        Ok(Some(PosteriorRecord {
            chunk_index,
            feature: self.feature.clone(),
            posterior_mean: posterior.mean(),
            posterior_variance: posterior.variance(),
            likelihood_variance,
            used_prior_fallback,
            cumulative_true_mean: self.true_mean.estimation(),
        }))
    }

    pub fn feature(&self) -> &FeatureId {
        &self.feature
    }

    pub fn belief(&self) -> Option<PosteriorBelief> {
        self.posterior.belief()
    }

    pub fn updater_state(&self) -> UpdaterState {
        self.posterior.state()
    }

    pub fn moments(&self) -> &RunningMomentEstimator {
        &self.moments
    }

    pub fn cumulative_true_mean(&self) -> f64 {
        self.true_mean.estimation()
    }

    pub fn chunks_seen(&self) -> u64 {
        self.chunks_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::conjugate_update;
    use crate::testing::dummies::{worked_example_first_chunk, worked_example_second_chunk};

    #[test]
    fn worked_example_end_to_end() {
        let mut track = FeatureTrack::new("x".into());
        assert!(track.observe(1, &worked_example_first_chunk()).unwrap().is_none());
        assert_eq!(track.updater_state(), UpdaterState::HasEmpiricalPrior);

        let rec = track
            .observe(2, &worked_example_second_chunk())
            .unwrap()
            .unwrap();
        assert_eq!(rec.chunk_index, 2);
        assert_eq!(rec.feature.as_str(), "x");
        assert!(!rec.used_prior_fallback);
        assert!((rec.likelihood_variance - 26.8).abs() < 1e-9);
        assert!((rec.posterior_variance - 3.0825).abs() < 0.01);
        assert!((rec.posterior_mean - 14.07).abs() < 0.01);
        assert!((rec.cumulative_true_mean - 15.6).abs() < 1e-12);
        assert_eq!(track.moments().count(), 5);
        assert_eq!(track.updater_state(), UpdaterState::Updated { steps: 1 });
    }

    #[test]
    fn fallback_uses_prior_variance_for_single_observation() {
        let mut moments = RunningMomentEstimator::new();
        moments
            .absorb_first(&ChunkSummary::from_values(&[7.0]))
            .unwrap();
        let prior = PosteriorBelief::new(6.0, 2.5).unwrap();

        let (v, fallback) = likelihood_variance_or_prior(&moments, &prior);
        assert!(fallback);
        assert_eq!(v, 2.5);

        let post = conjugate_update(&prior, 7.0, 1, v).unwrap();
        assert!((post.variance() - 1.25).abs() < 1e-12);
        assert!((post.mean() - 6.5).abs() < 1e-12);

        let (v, fallback) = likelihood_variance_or_prior(&RunningMomentEstimator::new(), &prior);
        assert!(fallback);
        assert_eq!(v, 2.5);
    }

    #[test]
    fn out_of_order_chunks_are_rejected_without_side_effects() {
        let mut track = FeatureTrack::new("x".into());
        let err = track.observe(2, &worked_example_first_chunk()).unwrap_err();
        assert_eq!(
            err.violation(),
            Some(&ContractViolation::OutOfOrderChunk {
                expected: 1,
                got: 2
            })
        );
        assert_eq!(track.chunks_seen(), 0);

        track.observe(1, &worked_example_first_chunk()).unwrap();
        let replay = track.observe(1, &worked_example_first_chunk()).unwrap_err();
        assert_eq!(replay.chunk_index(), 1);
        assert_eq!(track.chunks_seen(), 1);
        assert_eq!(track.moments().count(), 3);
    }

    #[test]
    fn failed_step_leaves_state_untouched() {
        let mut track = FeatureTrack::new("x".into());
        track.observe(1, &worked_example_first_chunk()).unwrap();
        let before = track.belief();

        let err = track.observe(2, &ChunkSummary::empty()).unwrap_err();
        assert_eq!(err.violation(), Some(&ContractViolation::EmptyChunk));
        assert_eq!(err.feature().as_str(), "x");
        assert_eq!(track.belief(), before);
        assert_eq!(track.moments().count(), 3);
        assert_eq!(track.chunks_seen(), 1);
    }

    #[test]
    fn advance_is_pure() {
        let track = FeatureTrack::new("x".into());
        let (next, rec) = track.advance(1, &worked_example_first_chunk()).unwrap();
        assert!(rec.is_none());
        assert_eq!(track.chunks_seen(), 0);
        assert!(track.belief().is_none());
        assert_eq!(next.chunks_seen(), 1);
    }

    #[test]
    fn constant_first_chunk_is_a_contract_violation() {
        let mut track = FeatureTrack::new("flat".into());
        let err = track
            .observe(1, &ChunkSummary::from_values(&[2.0, 2.0, 2.0]))
            .unwrap_err();
        assert!(matches!(
            err.violation(),
            Some(ContractViolation::InvalidPriorVariance(_))
        ));
    }
}
