//! Error types for axiscad

use thiserror::Error;

/// Result type alias using axiscad's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in axiscad core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Axis selector outside X, Y, Z
    #[error("Invalid axis '{0}'. Valid options: X, Y, Z")]
    InvalidAxis(String),

    /// The kernel refused to build the requested solid
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Export failed
    #[error("Export failed: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
