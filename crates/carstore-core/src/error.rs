//! Error type for store operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the data file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The data file is not a valid registry document.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// No car has the given id.
    #[error("Car not found: {0}")]
    NotFound(i64),
}
