mod chunk_summary;
mod data_chunk;

pub use chunk_summary::ChunkSummary;
pub use data_chunk::DataChunk;
