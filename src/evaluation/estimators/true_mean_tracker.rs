use crate::core::chunks::ChunkSummary;
use crate::evaluation::estimators::Estimator;

/// Cumulative mean of every observation seen so far.
///
/// Benchmark only: reported next to the posterior mean, never fed back into
/// the Bayesian recurrence.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrueMeanTracker {
    count: u64,
    mean: f64,
}

impl TrueMeanTracker {
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Estimator for TrueMeanTracker {
    /// Weighted by the chunk's observation count; empty chunks are ignored.
    fn add_chunk(&mut self, chunk: &ChunkSummary) {
        if chunk.is_empty() {
            return;
        }
        let total = self.count + chunk.count();
        self.mean += (chunk.mean() - self.mean) * chunk.count() as f64 / total as f64;
        self.count = total;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.count > 0 { self.mean } else { f64::NAN }
    }
}
