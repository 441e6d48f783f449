use crate::core::FeatureId;
use crate::core::chunks::DataChunk;
use crate::streams::ChunkStream;
use std::io::Error;

/// Replays a fixed list of chunks.
pub struct VecChunkStream {
    pub features: Vec<FeatureId>,
    pub chunks: Vec<DataChunk>,
    idx: usize,
}

impl VecChunkStream {
    pub fn new(features: Vec<FeatureId>, chunks: Vec<DataChunk>) -> Self {
        Self {
            features,
            chunks,
            idx: 0,
        }
    }
}

impl ChunkStream for VecChunkStream {
    fn features(&self) -> &[FeatureId] {
        &self.features
    }

    fn has_more_chunks(&self) -> bool {
        self.idx < self.chunks.len()
    }

    fn next_chunk(&mut self) -> Option<DataChunk> {
        let chunk = self.chunks.get(self.idx)?.clone();
        self.idx += 1;
        Some(chunk)
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.idx = 0;
        Ok(())
    }
}
