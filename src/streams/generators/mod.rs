mod gaussian;

pub use gaussian::{GaussianChunkGenerator, GaussianFeature};
