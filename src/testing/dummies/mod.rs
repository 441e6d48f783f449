mod chunks;

pub use chunks::{worked_example_first_chunk, worked_example_second_chunk};
