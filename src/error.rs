//! Error type shared by the library and the binary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Trial count or other parameter out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The generator could not produce a value. Not retried.
    #[error("randomness source failure: {0}")]
    RandomnessSourceFailure(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
