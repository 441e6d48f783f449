use crate::streams::{GaussianChunkGenerator, GaussianFeature};
use crate::ui::types::build::BuildError;
use crate::ui::types::build::error::to_usize;
use crate::ui::types::choices::GaussianParameters;

impl TryFrom<GaussianParameters> for GaussianChunkGenerator {
    type Error = BuildError;

    fn try_from(p: GaussianParameters) -> Result<Self, Self::Error> {
        if p.feature_count == 0 {
            return Err(BuildError::InvalidParameter(
                "feature_count must be >= 1".into(),
            ));
        }
        if !p.std_dev.is_finite() || p.std_dev <= 0.0 {
            return Err(BuildError::InvalidParameter(format!(
                "std_dev must be finite and > 0, got {}",
                p.std_dev
            )));
        }

        let specs = (0..p.feature_count)
            .map(|i| {
                GaussianFeature::new(
                    format!("x{}", i + 1),
                    p.mean + p.mean_step * i as f64,
                    p.std_dev,
                )
            })
            .collect();

        let chunk_size = to_usize(p.chunk_size, "chunk_size")?;
        let max_chunks = p
            .max_chunks
            .map(|v| to_usize(v, "max_chunks"))
            .transpose()?;

        GaussianChunkGenerator::new(specs, chunk_size, max_chunks, p.seed).map_err(BuildError::from)
    }
}
