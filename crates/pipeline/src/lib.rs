//! # Repochunk Pipeline
//!
//! Sequential per-repository ingestion around the chunk engine.
//!
//! ## Pipeline
//!
//! ```text
//! RepositorySource (already-fetched checkout)
//!     │
//!     ├──> collect() → SourceFile[]
//!     │
//!     ├──> ChunkAssembler → Chunk[]
//!     │
//!     └──> VectorSink
//!          ├─> purge_repository(url)   (once, before submission)
//!          └─> index_batch(chunks)     (fixed-size batches)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use repochunk_pipeline::{IngestPipeline, LocalCheckoutSource, MemorySink};
//! use repochunk_engine::RepositoryRef;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = RepositoryRef::parse("https://github.com/acme/widgets")?;
//!     let source = LocalCheckoutSource::new("/path/to/checkout", repo)?;
//!
//!     let pipeline = IngestPipeline::new(MemorySink::new());
//!     let stats = pipeline.run(&source).await?;
//!
//!     println!("Indexed {} of {} chunks", stats.chunks_indexed, stats.chunks);
//!     Ok(())
//! }
//! ```

mod error;
mod pipeline;
mod sink;
mod source;
mod stats;

pub use error::{PipelineError, Result};
pub use pipeline::IngestPipeline;
pub use sink::{MemorySink, VectorSink};
pub use source::{LocalCheckoutSource, RepositorySource};
pub use stats::PipelineStats;
