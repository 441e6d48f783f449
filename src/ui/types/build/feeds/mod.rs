use crate::streams::{ChunkStream, CsvChunkStream, GaussianChunkGenerator};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::FeedChoice;

mod csv_file;
mod gaussian_generator;

pub fn build_feed(choice: FeedChoice) -> Result<Box<dyn ChunkStream>, BuildError> {
    match choice {
        FeedChoice::CsvFile(p) => {
            let s = CsvChunkStream::try_from(p)?;
            Ok(Box::new(s))
        }
        FeedChoice::GaussianGenerator(p) => {
            let s = GaussianChunkGenerator::try_from(p)?;
            Ok(Box::new(s))
        }
    }
}
