use std::sync::atomic::{AtomicU64, Ordering};

/// Source of opaque, globally unique chunk identifiers.
///
/// Injected into the assembler so tests can substitute a deterministic
/// sequence; the production default is random UUIDs, which makes chunk IDs
/// fresh on every run (idempotence lives at repository granularity, via the
/// sink's delete-before-reinsert, not at chunk granularity).
pub trait ChunkIdSource: Send + Sync {
    /// Produce the next identifier; never repeats within a process
    fn next_id(&self) -> String;
}

/// Random v4 UUID identifiers (production default)
#[derive(Debug, Default, Clone)]
pub struct UuidIdSource;

impl UuidIdSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ChunkIdSource for UuidIdSource {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `chunk-0`, `chunk-1`, ... sequence for tests
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    counter: AtomicU64,
}

impl SequentialIdSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChunkIdSource for SequentialIdSource {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("chunk-{n}")
    }
}
