use std::fs::File;
use std::io::{BufRead, BufReader, Error, ErrorKind, Lines};
use std::path::{Path, PathBuf};

use crate::core::FeatureId;
use crate::core::chunks::{ChunkSummary, DataChunk};
use crate::streams::ChunkStream;
use crate::utils::file_parsing::{
    parse_numeric_cell, split_csv_preserving_quotes, strip_surrounding_quotes,
};

/// Splits a headed CSV file into fixed-size row chunks over its numeric
/// columns.
///
/// A column is numeric when every cell of the first chunk is either a number
/// or a missing marker. It is only kept when those numbers can seed a prior:
/// at least two of them, not all equal. In later chunks a cell that does not
/// parse counts as missing. Rows whose width differs from the header are
/// skipped.
pub struct CsvChunkStream {
    path: PathBuf,
    chunk_size: usize,
    width: usize,
    columns: Vec<usize>,
    features: Vec<FeatureId>,
    lines: Lines<BufReader<File>>,
    upcoming: Vec<Vec<String>>,
    read_failed: bool,
}

impl CsvChunkStream {
    pub fn new<P: AsRef<Path>>(path: P, chunk_size: usize) -> Result<Self, Error> {
        if chunk_size < 2 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "chunk_size must be >= 2 so the first chunk can seed a prior",
            ));
        }
        let path = path.as_ref().to_path_buf();
        let (header, lines) = open_with_header(&path)?;

        let mut stream = Self {
            path,
            chunk_size,
            width: header.len(),
            columns: Vec::new(),
            features: Vec::new(),
            lines,
            upcoming: Vec::new(),
            read_failed: false,
        };
        stream.fill_upcoming();

        let (columns, features) = detect_numeric_columns(&header, &stream.upcoming)?;
        tracing::info!(
            path = %stream.path.display(),
            numeric = features.len(),
            total = header.len(),
            "selected numeric columns"
        );
        stream.columns = columns;
        stream.features = features;
        Ok(stream)
    }

    fn fill_upcoming(&mut self) {
        self.upcoming.clear();
        while !self.read_failed && self.upcoming.len() < self.chunk_size {
            let line = match self.lines.next() {
                None => break,
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "read failed, ending feed");
                    self.read_failed = true;
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let cells = split_csv_preserving_quotes(&line);
            if cells.len() != self.width {
                tracing::warn!(
                    expected = self.width,
                    got = cells.len(),
                    "skipping row with wrong number of cells"
                );
                continue;
            }
            self.upcoming.push(cells);
        }
    }
}

impl ChunkStream for CsvChunkStream {
    fn features(&self) -> &[FeatureId] {
        &self.features
    }

    fn has_more_chunks(&self) -> bool {
        !self.upcoming.is_empty()
    }

    fn next_chunk(&mut self) -> Option<DataChunk> {
        if self.upcoming.is_empty() {
            return None;
        }
        let rows = std::mem::take(&mut self.upcoming);
        let columns: Vec<Vec<f64>> = self
            .columns
            .iter()
            .map(|&c| {
                rows.iter()
                    .map(|r| parse_numeric_cell(&r[c]).unwrap_or(f64::NAN))
                    .collect()
            })
            .collect();

        self.fill_upcoming();
        Some(DataChunk::from_columns(&self.features, &columns))
    }

    fn restart(&mut self) -> Result<(), Error> {
        let (header, lines) = open_with_header(&self.path)?;
        if header.len() != self.width {
            return Err(Error::new(
                ErrorKind::InvalidData,
                "header changed since the stream was opened",
            ));
        }
        self.lines = lines;
        self.read_failed = false;
        self.fill_upcoming();
        Ok(())
    }
}

fn open_with_header(path: &Path) -> Result<(Vec<String>, Lines<BufReader<File>>), Error> {
    let mut lines = BufReader::new(File::open(path)?).lines();
    loop {
        match lines.next() {
            None => {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("{} has no header line", path.display()),
                ));
            }
            Some(line) => {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let header = split_csv_preserving_quotes(&line)
                    .iter()
                    .map(|h| strip_surrounding_quotes(h).to_string())
                    .collect();
                return Ok((header, lines));
            }
        }
    }
}

fn detect_numeric_columns(
    header: &[String],
    rows: &[Vec<String>],
) -> Result<(Vec<usize>, Vec<FeatureId>), Error> {
    let mut columns = Vec::new();
    let mut features: Vec<FeatureId> = Vec::new();

    for (i, name) in header.iter().enumerate() {
        let parsed: Option<Vec<f64>> = rows.iter().map(|r| parse_numeric_cell(&r[i])).collect();
        let Some(values) = parsed else {
            continue;
        };
        if !values.iter().any(|v| v.is_finite()) {
            continue;
        }
        let summary = ChunkSummary::from_values(&values);
        if !summary.sample_variance().is_some_and(|v| v > 0.0) {
            tracing::warn!(
                column = %name,
                observations = summary.count(),
                "dropping column: first chunk cannot seed a prior"
            );
            continue;
        }
        let id = FeatureId::new(name.as_str());
        if features.contains(&id) {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("duplicate numeric column '{name}'"),
            ));
        }
        columns.push(i);
        features.push(id);
    }

    if features.is_empty() {
        return Err(Error::new(
            ErrorKind::InvalidData,
            "no numeric columns found in the first chunk",
        ));
    }
    Ok((columns, features))
}
