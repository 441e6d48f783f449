mod chunk_stream;
pub mod csv;
pub mod generators;

pub use chunk_stream::ChunkStream;
pub use csv::CsvChunkStream;
pub use generators::{GaussianChunkGenerator, GaussianFeature};
