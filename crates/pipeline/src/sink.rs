use crate::error::Result;
use async_trait::async_trait;
use repochunk_engine::Chunk;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// External embedding-and-index service boundary.
///
/// The pipeline contributes only chunk text and metadata; embedding vectors
/// and index schema are the sink's concern. Freshness is repository-level:
/// the pipeline purges by repository URL once per run before submitting.
#[async_trait]
pub trait VectorSink: Send + Sync {
    /// Delete every chunk previously stored for the repository URL
    async fn purge_repository(&self, repository_url: &str) -> Result<()>;

    /// Embed and upsert one batch; returns the per-batch success count
    async fn index_batch(&self, chunks: &[Chunk]) -> Result<usize>;
}

/// In-process sink keyed by repository URL.
///
/// Backs tests and the CLI's local dry-run wiring; a real deployment points
/// the pipeline at a remote sink instead.
#[derive(Default)]
pub struct MemorySink {
    by_repository: Mutex<HashMap<String, Vec<Chunk>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks currently stored for a repository URL
    pub async fn chunks_for(&self, repository_url: &str) -> Vec<Chunk> {
        self.by_repository
            .lock()
            .await
            .get(repository_url)
            .cloned()
            .unwrap_or_default()
    }

    /// Total stored chunk count across repositories
    pub async fn len(&self) -> usize {
        self.by_repository.lock().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VectorSink for MemorySink {
    async fn purge_repository(&self, repository_url: &str) -> Result<()> {
        let removed = self.by_repository.lock().await.remove(repository_url);
        if let Some(chunks) = removed {
            log::debug!("Purged {} chunks for {repository_url}", chunks.len());
        }
        Ok(())
    }

    async fn index_batch(&self, chunks: &[Chunk]) -> Result<usize> {
        let mut store = self.by_repository.lock().await;
        for chunk in chunks {
            let key = chunk
                .metadata
                .repository
                .as_ref()
                .map(|r| r.url.clone())
                .unwrap_or_default();
            store.entry(key).or_default().push(chunk.clone());
        }
        Ok(chunks.len())
    }
}
