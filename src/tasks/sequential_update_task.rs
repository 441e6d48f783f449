use crate::core::FeatureId;
use crate::evaluation::{PosteriorRecord, PosteriorTrace};
use crate::streams::ChunkStream;
use crate::tasks::{FeatureTrack, UpdateError};
use std::collections::HashMap;
use std::io::{Error, ErrorKind};
use std::sync::mpsc::Sender;

/// Drives every feature of a feed through its own [`FeatureTrack`], chunk by
/// chunk, in arrival order.
///
/// Each (feature, chunk >= 2) pair yields one [`PosteriorRecord`]; records are
/// collected in a [`PosteriorTrace`] and, when a progress channel is attached,
/// forwarded as they are produced. Any contract violation stops the run.
pub struct SequentialUpdateTask {
    stream: Box<dyn ChunkStream>,
    order: Vec<FeatureId>,
    tracks: HashMap<FeatureId, FeatureTrack>,
    trace: PosteriorTrace,

    max_chunks: Option<u64>,
    processed: u64,

    progress_tx: Option<Sender<PosteriorRecord>>,
}

impl SequentialUpdateTask {
    pub fn new(stream: Box<dyn ChunkStream>, max_chunks: Option<u64>) -> Result<Self, Error> {
        let order = stream.features().to_vec();
        if order.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "feed exposes no features",
            ));
        }

        let mut tracks = HashMap::with_capacity(order.len());
        for feature in &order {
            if tracks
                .insert(feature.clone(), FeatureTrack::new(feature.clone()))
                .is_some()
            {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("feature '{feature}' listed twice"),
                ));
            }
        }

        Ok(Self {
            stream,
            order,
            tracks,
            trace: PosteriorTrace::default(),
            max_chunks,
            processed: 0,
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<PosteriorRecord>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    /// Detaches the progress channel so its receiver sees the end of the run.
    pub fn take_progress(&mut self) -> Option<Sender<PosteriorRecord>> {
        self.progress_tx.take()
    }

    pub fn run(&mut self) -> Result<(), UpdateError> {
        tracing::info!(
            features = self.order.len(),
            max_chunks = ?self.max_chunks,
            "starting sequential update"
        );

        while self.stream.has_more_chunks() {
            if let Some(n) = self.max_chunks {
                if self.processed >= n {
                    break;
                }
            }
            let Some(chunk) = self.stream.next_chunk() else {
                break;
            };
            self.processed += 1;
            let chunk_index = self.processed;

            for feature in &self.order {
                let summary =
                    chunk
                        .summary_for(feature)
                        .ok_or_else(|| UpdateError::MissingFeature {
                            feature: feature.clone(),
                            chunk_index,
                        })?;
                let Some(track) = self.tracks.get_mut(feature) else {
                    continue;
                };
                if let Some(record) = track.observe(chunk_index, summary)? {
                    if let Some(tx) = &self.progress_tx {
                        let _ = tx.send(record.clone());
                    }
                    self.trace.push(record);
                }
            }
        }

        tracing::info!(
            chunks = self.processed,
            records = self.trace.len(),
            "sequential update finished"
        );
        Ok(())
    }

    pub fn trace(&self) -> &PosteriorTrace {
        &self.trace
    }

    pub fn track(&self, feature: &FeatureId) -> Option<&FeatureTrack> {
        self.tracks.get(feature)
    }

    pub fn features(&self) -> &[FeatureId] {
        &self.order
    }

    pub fn chunks_processed(&self) -> u64 {
        self.processed
    }
}
