mod csv_chunk_stream;

pub use csv_chunk_stream::CsvChunkStream;
