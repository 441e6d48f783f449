use crate::core::chunks::ChunkSummary;

/// Online scalar estimator fed one chunk summary at a time.
///
/// Implementations fold chunks in via [`add_chunk`](Estimator::add_chunk)
/// and expose the current estimate via [`estimation`](Estimator::estimation).
pub trait Estimator {
    /// Incorporates every observation summarised by `chunk`.
    fn add_chunk(&mut self, chunk: &ChunkSummary);

    /// Returns the current estimate, `NaN` before any observation.
    fn estimation(&self) -> f64;
}
