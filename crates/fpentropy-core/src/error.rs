//! Error types for fpentropy-core.

use thiserror::Error;

/// Fatal conditions: the dataset or configuration cannot produce a result.
///
/// Per-record parse failures are not represented here. They are recovered
/// locally by dropping the record (see [`crate::ParseError`]).
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("histogram has no observations")]
    EmptyHistogram,

    #[error("histogram entry {0:?} has a zero count")]
    ZeroCount(String),

    #[error("histogram total exceeds {} observations", u64::MAX)]
    CountOverflow,

    #[error("invalid resize configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
