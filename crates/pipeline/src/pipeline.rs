use crate::error::Result;
use crate::sink::VectorSink;
use crate::source::RepositorySource;
use crate::stats::PipelineStats;
use repochunk_engine::{ChunkAssembler, FileFilter};
use std::time::Instant;

const DEFAULT_BATCH_SIZE: usize = 100;

/// Sequential per-repository ingestion driver.
///
/// Drives purge → collect → chunk → submit. A failed sink batch is recorded
/// and the run continues; only source collection failure is fatal.
pub struct IngestPipeline<S: VectorSink> {
    sink: S,
    batch_size: usize,
}

impl<S: VectorSink> IngestPipeline<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Builder: override the sink submission batch size
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Run the whole pipeline for one repository
    pub async fn run(&self, source: &dyn RepositorySource) -> Result<PipelineStats> {
        let started = Instant::now();
        let repository = source.repository().clone();
        log::info!("Ingesting {} ({})", repository.name, repository.url);

        // Collection failure is the one fatal path; purge only once the new
        // file set is in hand, so a failed run leaves the old index intact.
        let files = source.collect()?;

        // Repository-level freshness: drop the previous run's chunks before
        // submitting the new ones.
        self.sink.purge_repository(&repository.url).await?;

        let mut stats = PipelineStats::new();
        stats.files = files.len();
        stats.files_skipped = files.iter().filter(|f| FileFilter::should_skip(f)).count();

        let assembler = ChunkAssembler::new().with_repository(repository.clone());
        let chunks = assembler.process_files(&files);
        for chunk in &chunks {
            stats.record_chunk(chunk.metadata.language.as_deref());
        }

        for batch in chunks.chunks(self.batch_size) {
            match self.sink.index_batch(batch).await {
                Ok(indexed) => stats.chunks_indexed += indexed,
                Err(e) => {
                    log::warn!("Sink rejected a batch of {}: {e}", batch.len());
                    stats.add_error(format!("batch of {} failed: {e}", batch.len()));
                }
            }
        }

        stats.time_ms = started.elapsed().as_millis() as u64;
        log::info!(
            "Ingested {}: {} files, {} chunks, {} indexed in {}ms",
            repository.name,
            stats.files,
            stats.chunks,
            stats.chunks_indexed,
            stats.time_ms
        );
        Ok(stats)
    }

    /// Access the underlying sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::sink::MemorySink;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use repochunk_engine::{Chunk, RepositoryRef, SourceFile};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource {
        repository: RepositoryRef,
        files: Vec<SourceFile>,
    }

    impl StaticSource {
        fn new(files: Vec<SourceFile>) -> Self {
            Self {
                repository: RepositoryRef::parse("https://github.com/acme/widgets").unwrap(),
                files,
            }
        }
    }

    impl RepositorySource for StaticSource {
        fn repository(&self) -> &RepositoryRef {
            &self.repository
        }

        fn collect(&self) -> Result<Vec<SourceFile>> {
            Ok(self.files.clone())
        }
    }

    fn fixture_files() -> Vec<SourceFile> {
        vec![
            SourceFile::new("src/app.js", "function a() {\n}\n"),
            SourceFile::new("node_modules/x/index.js", "var x;"),
            SourceFile::new("README.md", "# Widgets"),
        ]
    }

    #[tokio::test]
    async fn run_chunks_and_indexes_everything() {
        let pipeline = IngestPipeline::new(MemorySink::new());
        let source = StaticSource::new(fixture_files());

        let stats = pipeline.run(&source).await.unwrap();

        assert_eq!(stats.files, 3);
        assert_eq!(stats.files_skipped, 1);
        // src/app.js: file + function chunks; README.md: file + summary chunks.
        assert_eq!(stats.chunks, 4);
        assert_eq!(stats.chunks_indexed, stats.chunks);
        assert!(stats.errors.is_empty());

        let stored = pipeline
            .sink()
            .chunks_for(&source.repository.url)
            .await;
        assert_eq!(stored.len(), stats.chunks);
    }

    #[tokio::test]
    async fn rerun_replaces_rather_than_accumulates() {
        let pipeline = IngestPipeline::new(MemorySink::new());
        let source = StaticSource::new(fixture_files());

        let first = pipeline.run(&source).await.unwrap();
        let second = pipeline.run(&source).await.unwrap();

        assert_eq!(first.chunks, second.chunks);
        let stored = pipeline
            .sink()
            .chunks_for(&source.repository.url)
            .await;
        assert_eq!(stored.len(), second.chunks);
    }

    #[tokio::test]
    async fn language_breakdown_counts_chunks() {
        let pipeline = IngestPipeline::new(MemorySink::new());
        let source =
            StaticSource::new(vec![SourceFile::new("src/app.js", "function a() {\n}\n")]);

        let stats = pipeline.run(&source).await.unwrap();
        assert_eq!(stats.languages.get("javascript"), Some(&2));
    }

    struct UnreachableSource {
        repository: RepositoryRef,
    }

    impl RepositorySource for UnreachableSource {
        fn repository(&self) -> &RepositoryRef {
            &self.repository
        }

        fn collect(&self) -> Result<Vec<SourceFile>> {
            Err(PipelineError::InvalidPath("checkout vanished".to_string()))
        }
    }

    #[tokio::test]
    async fn collection_failure_leaves_previous_index_untouched() {
        let pipeline = IngestPipeline::new(MemorySink::new());
        let good = StaticSource::new(fixture_files());
        pipeline.run(&good).await.unwrap();
        let before = pipeline.sink().chunks_for(&good.repository.url).await;
        assert!(!before.is_empty());

        let bad = UnreachableSource {
            repository: good.repository.clone(),
        };
        assert!(pipeline.run(&bad).await.is_err());

        // The fatal run must not have purged the last successful ingest.
        let after = pipeline.sink().chunks_for(&good.repository.url).await;
        assert_eq!(after.len(), before.len());
    }

    struct RefusingSink;

    #[async_trait]
    impl VectorSink for RefusingSink {
        async fn purge_repository(&self, _repository_url: &str) -> Result<()> {
            Ok(())
        }

        async fn index_batch(&self, _chunks: &[Chunk]) -> Result<usize> {
            Err(PipelineError::sink("unavailable"))
        }
    }

    #[tokio::test]
    async fn sink_batch_failure_is_recorded_not_fatal() {
        let pipeline = IngestPipeline::new(RefusingSink);
        let source = StaticSource::new(fixture_files());

        let stats = pipeline.run(&source).await.unwrap();

        assert_eq!(stats.chunks_indexed, 0);
        assert!(!stats.errors.is_empty());
    }

    struct CountingSink {
        batches: AtomicUsize,
    }

    #[async_trait]
    impl VectorSink for CountingSink {
        async fn purge_repository(&self, _repository_url: &str) -> Result<()> {
            Ok(())
        }

        async fn index_batch(&self, chunks: &[Chunk]) -> Result<usize> {
            self.batches.fetch_add(1, Ordering::SeqCst);
            Ok(chunks.len())
        }
    }

    #[tokio::test]
    async fn batches_respect_the_configured_size() {
        let sink = CountingSink {
            batches: AtomicUsize::new(0),
        };
        let pipeline = IngestPipeline::new(sink).with_batch_size(1);
        let source = StaticSource::new(fixture_files());

        let stats = pipeline.run(&source).await.unwrap();

        assert_eq!(
            pipeline.sink().batches.load(Ordering::SeqCst),
            stats.chunks
        );
        assert_eq!(stats.chunks_indexed, stats.chunks);
    }
}
