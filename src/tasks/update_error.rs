use crate::core::{ContractViolation, FeatureId};
use thiserror::Error;

/// Failure of a sequential update run, pinned to the feature and chunk that
/// triggered it.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("feature '{feature}', chunk {chunk_index}: {source}")]
    Contract {
        feature: FeatureId,
        chunk_index: u64,
        #[source]
        source: ContractViolation,
    },

    #[error("chunk {chunk_index} carries no summary for feature '{feature}'")]
    MissingFeature { feature: FeatureId, chunk_index: u64 },
}

impl UpdateError {
    pub fn feature(&self) -> &FeatureId {
        match self {
            UpdateError::Contract { feature, .. } | UpdateError::MissingFeature { feature, .. } => {
                feature
            }
        }
    }

    pub fn chunk_index(&self) -> u64 {
        match self {
            UpdateError::Contract { chunk_index, .. }
            | UpdateError::MissingFeature { chunk_index, .. } => *chunk_index,
        }
    }

    pub fn violation(&self) -> Option<&ContractViolation> {
        match self {
            UpdateError::Contract { source, .. } => Some(source),
            UpdateError::MissingFeature { .. } => None,
        }
    }
}
