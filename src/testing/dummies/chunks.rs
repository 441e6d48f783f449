use crate::core::chunks::ChunkSummary;

/// `[10, 12, 14]`: mean 12, sum of squared deviations 8.
pub fn worked_example_first_chunk() -> ChunkSummary {
    ChunkSummary::from_values(&[10.0, 12.0, 14.0])
}

/// `[20, 22]`: mean 21, sum of squared deviations 2.
pub fn worked_example_second_chunk() -> ChunkSummary {
    ChunkSummary::from_values(&[20.0, 22.0])
}
