use serde::{Deserialize, Serialize};

/// Statistics about one ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Number of files collected from the source
    pub files: usize,

    /// Files that contributed no chunks (filter skips)
    pub files_skipped: usize,

    /// Number of chunks assembled
    pub chunks: usize,

    /// Number of chunks the sink confirmed indexed
    pub chunks_indexed: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Chunk count per language tag
    pub languages: std::collections::HashMap<String, usize>,

    /// Errors encountered (non-fatal; the run still completed)
    pub errors: Vec<String>,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self {
            files: 0,
            files_skipped: 0,
            chunks: 0,
            chunks_indexed: 0,
            time_ms: 0,
            languages: std::collections::HashMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn record_chunk(&mut self, language: Option<&str>) {
        self.chunks += 1;
        let tag = language.unwrap_or("unknown").to_string();
        *self.languages.entry(tag).or_insert(0) += 1;
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}
