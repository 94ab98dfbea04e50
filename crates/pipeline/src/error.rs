use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Chunk engine error: {0}")]
    ChunkError(#[from] repochunk_engine::ChunkError),

    #[error("Invalid repository path: {0}")]
    InvalidPath(String),

    #[error("Vector sink error: {0}")]
    SinkError(String),

    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// Create a sink error
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::SinkError(msg.into())
    }
}
