use crate::streams::CsvChunkStream;
use crate::ui::types::build::BuildError;
use crate::ui::types::build::error::to_usize;
use crate::ui::types::choices::CsvFileParameters;

impl TryFrom<CsvFileParameters> for CsvChunkStream {
    type Error = BuildError;

    fn try_from(p: CsvFileParameters) -> Result<Self, Self::Error> {
        let chunk_size = to_usize(p.chunk_size, "chunk_size")?;
        CsvChunkStream::new(p.path, chunk_size).map_err(BuildError::from)
    }
}
