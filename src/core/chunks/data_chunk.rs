use crate::core::chunks::ChunkSummary;
use crate::core::feature::FeatureId;

/// One chunk as delivered by a feed: a summary per feature, in feed order.
#[derive(Debug, Clone, Default)]
pub struct DataChunk {
    summaries: Vec<(FeatureId, ChunkSummary)>,
}

impl DataChunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarizes column-major raw values, one column per feature.
    pub fn from_columns(features: &[FeatureId], columns: &[Vec<f64>]) -> Self {
        let summaries = features
            .iter()
            .zip(columns)
            .map(|(f, col)| (f.clone(), ChunkSummary::from_values(col)))
            .collect();
        Self { summaries }
    }

    pub fn push(&mut self, feature: FeatureId, summary: ChunkSummary) {
        self.summaries.push((feature, summary));
    }

    pub fn with_summary(mut self, feature: FeatureId, summary: ChunkSummary) -> Self {
        self.push(feature, summary);
        self
    }

    pub fn summary_for(&self, feature: &FeatureId) -> Option<&ChunkSummary> {
        self.summaries
            .iter()
            .find(|(f, _)| f == feature)
            .map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FeatureId, &ChunkSummary)> {
        self.summaries.iter().map(|(f, s)| (f, s))
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}
