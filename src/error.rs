//! Error type for the fallible edges of the crate.
//!
//! Normalizing, segmenting and rendering never fail; only reading input and
//! decoding registry documents do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse registry document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
