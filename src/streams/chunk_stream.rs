use crate::core::FeatureId;
use crate::core::chunks::DataChunk;
use std::io::Error;

/// Pull-based feed of ordered chunks over a fixed set of numeric features.
///
/// Chunks are yielded in a stable order and are never reordered, duplicated
/// or dropped. Every chunk carries a summary for every feature in
/// [`features`](ChunkStream::features), and the first chunk must hold at
/// least two observations per feature so a prior can be seeded.
pub trait ChunkStream {
    /// Features this feed produces, in feed order.
    ///
    /// Fixed for the lifetime of the stream.
    fn features(&self) -> &[FeatureId];

    /// Whether another chunk *may* follow.
    ///
    /// Cheap and side effect free. Once it returns `false`,
    /// [`next_chunk`](ChunkStream::next_chunk) must return `None`.
    fn has_more_chunks(&self) -> bool;

    /// Produces the next chunk, or `None` when the feed is exhausted.
    fn next_chunk(&mut self) -> Option<DataChunk>;

    /// Rewinds to the first chunk. Features stay unchanged.
    fn restart(&mut self) -> Result<(), Error>;
}
