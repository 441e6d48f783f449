use crate::core::chunks::ChunkSummary;
use crate::core::errors::ContractViolation;

/// Immutable snapshot of one feature's accumulated moments.
///
/// `m2` is the sum of squared deviations from the running mean. Every
/// combine step yields a fresh snapshot; nothing is updated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningMoments {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    pub fn from_chunk(chunk: &ChunkSummary) -> Result<Self, ContractViolation> {
        if chunk.is_empty() {
            return Err(ContractViolation::EmptyChunk);
        }
        Ok(Self {
            count: chunk.count(),
            mean: chunk.mean(),
            m2: chunk.sum_squared_deviation(),
        })
    }

    /// Batched Welford step: folds `chunk` into the accumulated state.
    ///
    /// Exact for combining two groups' sums of squares, so the history never
    /// has to be revisited.
    pub fn combine(self, chunk: &ChunkSummary) -> Result<Self, ContractViolation> {
        if chunk.is_empty() {
            return Err(ContractViolation::EmptyChunk);
        }
        let n_a = self.count as f64;
        let n_b = chunk.count() as f64;
        let count = self.count + chunk.count();
        let n = count as f64;

        let delta = chunk.mean() - self.mean;
        let mean = self.mean + delta * n_b / n;
        let m2 = self.m2 + chunk.sum_squared_deviation() + delta * delta * n_a * n_b / n;

        Ok(Self { count, mean, m2 })
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
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// `m2 / (count - 1)`, undefined (None) for a single observation.
    pub fn sample_variance(&self) -> Option<f64> {
        if self.count > 1 {
            Some(self.m2 / (self.count - 1) as f64)
        } else {
            None
        }
    }
}

impl TryFrom<RunningMoments> for ChunkSummary {
    type Error = ContractViolation;

    /// Re-expresses an accumulated group as a single chunk.
    fn try_from(moments: RunningMoments) -> Result<Self, Self::Error> {
        ChunkSummary::new(moments.count, moments.mean, moments.m2)
    }
}

/// Running mean/variance of one feature across an ordered stream of chunks.
#[derive(Debug, Clone, Default)]
pub struct RunningMomentEstimator {
    state: Option<RunningMoments>,
}

impl RunningMomentEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the estimator; allowed once per instance.
    pub fn absorb_first(&mut self, chunk: &ChunkSummary) -> Result<(), ContractViolation> {
        if self.state.is_some() {
            return Err(ContractViolation::AlreadyInitialized);
        }
        self.state = Some(RunningMoments::from_chunk(chunk)?);
        Ok(())
    }

    pub fn absorb_next(&mut self, chunk: &ChunkSummary) -> Result<(), ContractViolation> {
        let current = self.state.ok_or(ContractViolation::NotInitialized)?;
        self.state = Some(current.combine(chunk)?);
        Ok(())
    }

    /// Sample variance over everything absorbed so far.
    ///
    /// `None` while `count <= 1`; callers substitute the prior variance.
    pub fn likelihood_variance(&self) -> Option<f64> {
        self.state.and_then(|s| s.sample_variance())
    }

    pub fn snapshot(&self) -> Option<RunningMoments> {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn count(&self) -> u64 {
        self.state.map_or(0, |s| s.count())
    }

    pub fn mean(&self) -> Option<f64> {
        self.state.map(|s| s.mean())
    }

    pub fn m2(&self) -> Option<f64> {
        self.state.map(|s| s.m2())
    }
}
