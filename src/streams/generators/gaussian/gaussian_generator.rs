use std::io::{Error, ErrorKind};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::core::FeatureId;
use crate::core::chunks::DataChunk;
use crate::streams::ChunkStream;

/// Generating distribution of one synthetic feature.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianFeature {
    pub name: FeatureId,
    pub mean: f64,
    pub std_dev: f64,
}

impl GaussianFeature {
    pub fn new<N: Into<FeatureId>>(name: N, mean: f64, std_dev: f64) -> Self {
        Self {
            name: name.into(),
            mean,
            std_dev,
        }
    }
}

/// Synthetic feed drawing i.i.d. Gaussian observations per feature.
#[derive(Debug)]
pub struct GaussianChunkGenerator {
    seed: u64,
    rng: StdRng,
    specs: Vec<GaussianFeature>,
    distributions: Vec<Normal<f64>>,
    features: Vec<FeatureId>,
    chunk_size: usize,
    max_chunks: Option<usize>,
    produced: usize,
}

impl GaussianChunkGenerator {
    pub fn new(
        specs: Vec<GaussianFeature>,
        chunk_size: usize,
        max_chunks: Option<usize>,
        seed: u64,
    ) -> Result<Self, Error> {
        if specs.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "at least one feature is required",
            ));
        }
        if chunk_size < 2 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "chunk_size must be >= 2 so the first chunk can seed a prior",
            ));
        }
        let distributions = specs
            .iter()
            .map(|s| {
                if !s.mean.is_finite() || !s.std_dev.is_finite() || s.std_dev <= 0.0 {
                    return Err(s);
                }
                Normal::new(s.mean, s.std_dev).map_err(|_| s)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|bad| {
                Error::new(
                    ErrorKind::InvalidInput,
                    format!(
                        "feature '{}' needs a finite mean and std_dev > 0",
                        bad.name
                    ),
                )
            })?;

        let features = specs.iter().map(|s| s.name.clone()).collect();
        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            specs,
            distributions,
            features,
            chunk_size,
            max_chunks,
            produced: 0,
        })
    }

    pub fn specs(&self) -> &[GaussianFeature] {
        &self.specs
    }

    /// Next chunk's raw observations, one column per feature.
    pub fn next_columns(&mut self) -> Option<Vec<Vec<f64>>> {
        if !self.has_more_chunks() {
            return None;
        }
        let mut columns = Vec::with_capacity(self.distributions.len());
        for dist in &self.distributions {
            let col: Vec<f64> = (0..self.chunk_size)
                .map(|_| dist.sample(&mut self.rng))
                .collect();
            columns.push(col);
        }
        self.produced += 1;
        Some(columns)
    }
}

impl ChunkStream for GaussianChunkGenerator {
    fn features(&self) -> &[FeatureId] {
        &self.features
    }

    fn has_more_chunks(&self) -> bool {
        self.max_chunks.is_none_or(|max| self.produced < max)
    }

    fn next_chunk(&mut self) -> Option<DataChunk> {
        let columns = self.next_columns()?;
        Some(DataChunk::from_columns(&self.features, &columns))
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.produced = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_features() -> Vec<GaussianFeature> {
        vec![
            GaussianFeature::new("x", 5.0, 2.0),
            GaussianFeature::new("y", -100.0, 0.5),
        ]
    }

    #[test]
    fn ctor_guards() {
        let err = GaussianChunkGenerator::new(vec![], 10, None, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = GaussianChunkGenerator::new(two_features(), 1, None, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        for (mean, std_dev) in [(0.0, 0.0), (0.0, -1.0), (f64::NAN, 1.0), (0.0, f64::INFINITY)] {
            let bad = vec![GaussianFeature::new("z", mean, std_dev)];
            let err = GaussianChunkGenerator::new(bad, 10, None, 1).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn respects_max_chunks_and_shape() {
        let mut g = GaussianChunkGenerator::new(two_features(), 25, Some(3), 9).unwrap();
        assert_eq!(g.features().len(), 2);

        let mut n = 0;
        while let Some(chunk) = g.next_chunk() {
            n += 1;
            assert_eq!(chunk.len(), 2);
            for (_, s) in chunk.iter() {
                assert_eq!(s.count(), 25);
            }
        }
        assert_eq!(n, 3);
        assert!(!g.has_more_chunks());
        assert!(g.next_chunk().is_none());
    }

    #[test]
    fn restart_replays_same_draws() {
        let mut g = GaussianChunkGenerator::new(two_features(), 8, Some(2), 1234).unwrap();
        let first: Vec<_> = std::iter::from_fn(|| g.next_columns()).collect();
        g.restart().unwrap();
        let second: Vec<_> = std::iter::from_fn(|| g.next_columns()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn draws_follow_generating_distribution() {
        let mut g = GaussianChunkGenerator::new(two_features(), 5_000, Some(1), 3).unwrap();
        let chunk = g.next_chunk().unwrap();
        let x = chunk.summary_for(&FeatureId::from("x")).unwrap();
        let y = chunk.summary_for(&FeatureId::from("y")).unwrap();
        assert!((x.mean() - 5.0).abs() < 0.15);
        assert!((x.sample_variance().unwrap() - 4.0).abs() < 0.4);
        assert!((y.mean() + 100.0).abs() < 0.05);
    }
}
