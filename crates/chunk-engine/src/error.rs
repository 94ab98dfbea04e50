use thiserror::Error;

/// Result type for chunk engine operations
pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors that can occur while chunking a file set
#[derive(Error, Debug)]
pub enum ChunkError {
    /// Repository URL could not be split into owner/name
    #[error("Invalid repository URL: {0}")]
    InvalidRepositoryUrl(String),

    /// Boundary detection failed for a file
    #[error("Boundary detection failed: {0}")]
    BoundaryDetection(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ChunkError {
    /// Create an invalid repository URL error
    pub fn invalid_repository_url(url: impl Into<String>) -> Self {
        Self::InvalidRepositoryUrl(url.into())
    }

    /// Create a boundary detection error
    pub fn boundary(msg: impl Into<String>) -> Self {
        Self::BoundaryDetection(msg.into())
    }
}
