use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub(crate) fn to_usize(value: u64, field: &str) -> Result<usize, BuildError> {
    usize::try_from(value)
        .map_err(|_| BuildError::InvalidParameter(format!("{field} too large for usize")))
}
