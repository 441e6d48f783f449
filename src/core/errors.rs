use thiserror::Error;

/// Caller-side contract violations raised by the estimators and updaters.
///
/// None of these are data conditions: each one means the caller fed the
/// core out of sequence or with a malformed chunk. They are surfaced as-is
/// and never auto-corrected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("already initialized from a first chunk")]
    AlreadyInitialized,

    #[error("not initialized: the first chunk has not been absorbed")]
    NotInitialized,

    #[error("chunk holds no observations")]
    EmptyChunk,

    #[error("first chunk needs at least 2 observations to seed a prior, got {count}")]
    InsufficientFirstChunk { count: u64 },

    #[error("invalid chunk summary: {0}")]
    InvalidChunk(String),

    #[error("prior variance must be finite and > 0, got {0}")]
    InvalidPriorVariance(f64),

    #[error("likelihood variance must be finite and > 0, got {0}")]
    InvalidLikelihoodVariance(f64),

    #[error("chunk {got} arrived out of order, expected chunk {expected}")]
    OutOfOrderChunk { expected: u64, got: u64 },
}
