//! # Repochunk Engine
//!
//! Chunking and use-case classification for repository ingestion.
//!
//! ## Philosophy
//!
//! The engine partitions a repository's raw files into retrieval-sized
//! chunks and labels each one with the downstream intents it serves
//! (bug-fixing, code-generation, explanation). Boundary detection is a
//! deliberate line-oriented heuristic rather than a parser: the pipeline
//! must treat arbitrary languages uniformly, so precision is traded for
//! language independence behind a narrow [`BoundaryDetector`] seam.
//!
//! ## Architecture
//!
//! ```text
//! SourceFile[]
//!     │
//!     ├──> File Filter (size / binary / denylist)
//!     │
//!     ├──> Boundary Detector (heuristic class/function regions)
//!     │
//!     ├──> Use-Case Classifier (path & name heuristics)
//!     │
//!     └──> Chunk Assembler
//!          ├─> File chunk per kept file
//!          ├─> Summary chunk for READMEs
//!          └─> Class/Function chunks per detected region
//! ```
//!
//! ## Example
//!
//! ```rust
//! use repochunk_engine::{ChunkAssembler, SourceFile};
//!
//! let assembler = ChunkAssembler::new();
//! let files = vec![SourceFile::new(
//!     "src/app.js",
//!     "function handleError(e) {\n  log(e);\n}",
//! )];
//!
//! for chunk in assembler.process_files(&files) {
//!     println!("{:?} {:?}", chunk.kind, chunk.metadata.symbol_name);
//! }
//! ```

mod assembler;
mod boundary;
mod classify;
mod error;
mod filter;
pub mod heuristics;
mod id;
mod language;
mod types;

pub use assembler::ChunkAssembler;
pub use boundary::{BoundaryDetector, HeuristicBoundaryDetector, SymbolKind, SymbolRegion};
pub use classify::UseCaseClassifier;
pub use error::{ChunkError, Result};
pub use filter::FileFilter;
pub use id::{ChunkIdSource, SequentialIdSource, UuidIdSource};
pub use language::Language;
pub use types::{
    Chunk, ChunkKind, ChunkMetadata, LineRange, RepositoryRef, SourceFile, UseCase, UseCaseSet,
};
