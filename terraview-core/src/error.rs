//! Error types for terraview

use thiserror::Error;

/// Main error type for terraview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no valid points found in input")]
    EmptyPointCloud,

    #[error("polygon requires at least 3 vertices, got {got}")]
    InsufficientPolygonVertices { got: usize },
}

/// Result type alias for terraview operations
pub type Result<T> = std::result::Result<T, Error>;
