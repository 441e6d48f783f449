pub mod vec_chunk_stream;

pub use vec_chunk_stream::VecChunkStream;
