use crate::boundary::{BoundaryDetector, HeuristicBoundaryDetector, SymbolKind};
use crate::classify::UseCaseClassifier;
use crate::filter::FileFilter;
use crate::id::{ChunkIdSource, UuidIdSource};
use crate::language::Language;
use crate::types::{
    Chunk, ChunkKind, ChunkMetadata, LineRange, RepositoryRef, SourceFile, UseCase, UseCaseSet,
};

/// Combines filter, boundary detection and classification into the final
/// ordered chunk list.
///
/// Stateless across files: each file's chunks are a pure function of that
/// file, so distinct files may be processed concurrently by callers that
/// preserve file-list order themselves.
pub struct ChunkAssembler {
    detector: Box<dyn BoundaryDetector>,
    ids: Box<dyn ChunkIdSource>,
    repository: Option<RepositoryRef>,
}

impl ChunkAssembler {
    /// Assembler with the heuristic detector and random UUID ids
    #[must_use]
    pub fn new() -> Self {
        Self {
            detector: Box::new(HeuristicBoundaryDetector::new()),
            ids: Box::new(UuidIdSource::new()),
            repository: None,
        }
    }

    /// Builder: substitute the boundary detector
    #[must_use]
    pub fn with_detector(mut self, detector: Box<dyn BoundaryDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Builder: substitute the chunk ID source
    #[must_use]
    pub fn with_id_source(mut self, ids: Box<dyn ChunkIdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Builder: attach repository provenance to every emitted chunk
    #[must_use]
    pub fn with_repository(mut self, repository: RepositoryRef) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Whole-file chunks: the `File` chunk, plus a `Summary` chunk for READMEs
    #[must_use]
    pub fn file_chunks(&self, file: &SourceFile) -> Vec<Chunk> {
        let mut chunks = vec![Chunk::new(
            self.ids.next_id(),
            file.content.clone(),
            ChunkKind::File,
            UseCaseClassifier::classify_file(file),
            self.base_metadata(file),
        )];

        if Self::is_readme(file) {
            let summary_labels: UseCaseSet = [UseCase::Explanation].into_iter().collect();
            chunks.push(Chunk::new(
                self.ids.next_id(),
                file.content.clone(),
                ChunkKind::Summary,
                summary_labels,
                self.base_metadata(file),
            ));
        }

        chunks
    }

    /// Symbol chunks for files in a recognized programming language
    #[must_use]
    pub fn symbol_chunks(&self, file: &SourceFile) -> Vec<Chunk> {
        if !self.is_recognized_language(file) {
            return Vec::new();
        }

        let lines: Vec<&str> = file.content.lines().collect();
        let regions = match self.detector.detect_symbols(&lines) {
            Ok(regions) => regions,
            Err(e) => {
                // A per-file detector fault never aborts the batch.
                log::warn!(
                    "Symbol extraction failed for {}: {e}",
                    file.relative_path
                );
                return Vec::new();
            }
        };

        regions
            .into_iter()
            .map(|region| {
                let kind = match region.kind {
                    SymbolKind::Class => ChunkKind::Class,
                    SymbolKind::Function => ChunkKind::Function,
                };
                let use_cases = UseCaseClassifier::classify_symbol(&region.name, region.kind, file);
                let metadata = self
                    .base_metadata(file)
                    .line_range(LineRange::new(region.start_line, region.end_line))
                    .symbol_name(region.name);

                Chunk::new(
                    self.ids.next_id(),
                    region.lines.join("\n"),
                    kind,
                    use_cases,
                    metadata,
                )
            })
            .collect()
    }

    /// All chunks for one file; skipped files contribute nothing
    #[must_use]
    pub fn process_file(&self, file: &SourceFile) -> Vec<Chunk> {
        if FileFilter::should_skip(file) {
            return Vec::new();
        }

        let mut chunks = self.file_chunks(file);
        chunks.extend(self.symbol_chunks(file));
        chunks
    }

    /// Flattened chunk list for a whole file set, in input file order.
    ///
    /// The sole entry point consumed by the orchestrator. Never reorders
    /// across files and never deduplicates.
    #[must_use]
    pub fn process_files(&self, files: &[SourceFile]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for file in files {
            chunks.extend(self.process_file(file));
        }
        log::info!("Assembled {} chunks from {} files", chunks.len(), files.len());
        chunks
    }

    fn base_metadata(&self, file: &SourceFile) -> ChunkMetadata {
        let mut metadata = ChunkMetadata::for_file(&file.relative_path);
        if let Some(language) = &file.language {
            metadata = metadata.language(language.clone());
        }
        if let Some(repository) = &self.repository {
            metadata = metadata.repository(repository.clone());
        }
        metadata
    }

    fn is_recognized_language(&self, file: &SourceFile) -> bool {
        let language = match &file.language {
            Some(tag) => Language::from_tag(tag),
            None => Language::from_path(&file.relative_path),
        };
        language.is_programming()
    }

    fn is_readme(file: &SourceFile) -> bool {
        let name = file.file_name().to_lowercase();
        name == "readme" || name == "readme.md" || (name.contains("readme") && name.ends_with(".md"))
    }
}

impl Default for ChunkAssembler {
    fn default() -> Self {
        Self::new()
    }
}
