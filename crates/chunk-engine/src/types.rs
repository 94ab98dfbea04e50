use crate::error::{ChunkError, Result};
use serde::{Deserialize, Serialize};

/// Reference to the repository a file set was collected from.
///
/// Immutable once resolved; `owner`/`name` are derived from the URL when not
/// supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Canonical repository URL (also the purge key at the sink)
    pub url: String,

    /// Owning account or organization
    pub owner: String,

    /// Repository name, without a trailing `.git`
    pub name: String,

    /// Branch to ingest, when not the default
    pub branch: Option<String>,
}

impl RepositoryRef {
    /// Create a reference with explicit owner and name
    pub fn new(url: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            owner: owner.into(),
            name: name.into(),
            branch: None,
        }
    }

    /// Derive owner and name from the URL path segments.
    ///
    /// The last two non-empty `/`-separated segments become owner and name;
    /// a trailing `.git` is stripped from the name.
    pub fn parse(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let segments: Vec<&str> = url
            .trim_end_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if segments.len() < 2 {
            return Err(ChunkError::invalid_repository_url(&url));
        }

        let name = segments[segments.len() - 1]
            .trim_end_matches(".git")
            .to_string();
        let owner = segments[segments.len() - 2].to_string();

        if name.is_empty() || owner.contains(':') {
            return Err(ChunkError::invalid_repository_url(&url));
        }

        Ok(Self {
            url,
            owner,
            name,
            branch: None,
        })
    }

    /// Builder: set the branch
    #[must_use]
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

/// A single file handed to the core by the repository source.
///
/// Read-only input; the core never mutates or retains it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the repository root
    pub relative_path: String,

    /// Full decoded text content
    pub content: String,

    /// Detected language tag, if any (e.g. "rust", "python")
    pub language: Option<String>,

    /// Content size in bytes
    pub byte_size: usize,
}

impl SourceFile {
    /// Create a file, detecting the language from the path extension
    pub fn new(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        let relative_path = relative_path.into();
        let content = content.into();
        let byte_size = content.len();
        let language = match crate::language::Language::from_path(&relative_path) {
            crate::language::Language::Unknown => None,
            lang => Some(lang.as_str().to_string()),
        };

        Self {
            relative_path,
            content,
            language,
            byte_size,
        }
    }

    /// Builder: override the detected language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// File name component of the relative path
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }
}

/// Kind of retrievable unit a chunk represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChunkKind {
    /// Whole-file chunk
    File,
    /// Class or interface region
    Class,
    /// Function region
    Function,
    /// Repository summary (README) chunk
    Summary,
}

impl ChunkKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Class => "class",
            Self::Function => "function",
            Self::Summary => "summary",
        }
    }
}

/// Downstream consumer intent a chunk may serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UseCase {
    BugFixing,
    CodeGeneration,
    Explanation,
}

impl UseCase {
    /// All use cases, in declaration order
    pub const ALL: [Self; 3] = [Self::BugFixing, Self::CodeGeneration, Self::Explanation];

    const fn bit(self) -> u8 {
        match self {
            Self::BugFixing => 0b001,
            Self::CodeGeneration => 0b010,
            Self::Explanation => 0b100,
        }
    }

    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BugFixing => "bug_fixing",
            Self::CodeGeneration => "code_generation",
            Self::Explanation => "explanation",
        }
    }
}

/// Compact set of [`UseCase`] labels.
///
/// Iterates in declaration order; serialized as a plain list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<UseCase>", into = "Vec<UseCase>")]
pub struct UseCaseSet(u8);

impl UseCaseSet {
    /// Empty set
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Set containing every use case
    #[must_use]
    pub const fn all() -> Self {
        Self(
            UseCase::BugFixing.bit() | UseCase::CodeGeneration.bit() | UseCase::Explanation.bit(),
        )
    }

    /// Add a use case to the set
    pub fn insert(&mut self, use_case: UseCase) {
        self.0 |= use_case.bit();
    }

    /// Check membership
    #[must_use]
    pub const fn contains(self, use_case: UseCase) -> bool {
        self.0 & use_case.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate members in declaration order
    pub fn iter(self) -> impl Iterator<Item = UseCase> {
        UseCase::ALL.into_iter().filter(move |u| self.contains(*u))
    }
}

impl FromIterator<UseCase> for UseCaseSet {
    fn from_iter<I: IntoIterator<Item = UseCase>>(iter: I) -> Self {
        let mut set = Self::empty();
        for use_case in iter {
            set.insert(use_case);
        }
        set
    }
}

impl From<Vec<UseCase>> for UseCaseSet {
    fn from(v: Vec<UseCase>) -> Self {
        v.into_iter().collect()
    }
}

impl From<UseCaseSet> for Vec<UseCase> {
    fn from(set: UseCaseSet) -> Self {
        set.iter().collect()
    }
}

/// 0-indexed line range, inclusive on both ends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of lines covered
    #[must_use]
    pub const fn line_count(self) -> usize {
        self.end.saturating_sub(self.start) + 1
    }
}

/// Metadata attached to every chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Repository the chunk came from
    pub repository: Option<RepositoryRef>,

    /// Source file path, relative to the repository root
    pub file_path: String,

    /// Language tag, if detected
    pub language: Option<String>,

    /// Line range within the file; present only for symbol chunks
    pub line_range: Option<LineRange>,

    /// Symbol name; present only for class/function chunks
    pub symbol_name: Option<String>,
}

impl ChunkMetadata {
    /// Create metadata for a file path
    pub fn for_file(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Default::default()
        }
    }

    /// Builder: set repository reference
    #[must_use]
    pub fn repository(mut self, repository: RepositoryRef) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Builder: set language tag
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builder: set line range
    #[must_use]
    pub const fn line_range(mut self, range: LineRange) -> Self {
        self.line_range = Some(range);
        self
    }

    /// Builder: set symbol name
    #[must_use]
    pub fn symbol_name(mut self, name: impl Into<String>) -> Self {
        self.symbol_name = Some(name.into());
        self
    }
}

/// A retrievable unit of text plus metadata, ready for the vector sink.
///
/// Chunks are created once per run and are immutable afterwards; `File` and
/// `Summary` chunks never carry a line range, `Class`/`Function` chunks
/// always do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Opaque globally unique identifier
    pub id: String,

    /// The chunk text submitted for embedding
    pub content: String,

    /// What kind of unit this is
    pub kind: ChunkKind,

    /// Consumer intents this chunk serves; never empty
    pub use_cases: UseCaseSet,

    /// Provenance metadata
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new chunk
    #[must_use]
    pub fn new(
        id: String,
        content: String,
        kind: ChunkKind,
        use_cases: UseCaseSet,
        metadata: ChunkMetadata,
    ) -> Self {
        Self {
            id,
            content,
            kind,
            use_cases,
            metadata,
        }
    }

    /// Number of lines in the chunk content
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_derives_owner_and_name() {
        let repo = RepositoryRef::parse("https://github.com/acme/widgets.git").unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.name, "widgets");
        assert_eq!(repo.url, "https://github.com/acme/widgets.git");
        assert_eq!(repo.branch, None);
    }

    #[test]
    fn parse_handles_trailing_slash_and_plain_name() {
        let repo = RepositoryRef::parse("https://github.com/acme/widgets/").unwrap();
        assert_eq!(repo.owner, "acme");
        assert_eq!(repo.name, "widgets");
    }

    #[test]
    fn parse_rejects_url_without_segments() {
        assert!(RepositoryRef::parse("https://").is_err());
        assert!(RepositoryRef::parse("").is_err());
    }

    #[test]
    fn branch_builder() {
        let repo = RepositoryRef::new("u", "o", "n").branch("dev");
        assert_eq!(repo.branch.as_deref(), Some("dev"));
    }

    #[test]
    fn source_file_detects_language_and_size() {
        let file = SourceFile::new("src/main.rs", "fn main() {}");
        assert_eq!(file.language.as_deref(), Some("rust"));
        assert_eq!(file.byte_size, 12);
        assert_eq!(file.file_name(), "main.rs");
    }

    #[test]
    fn source_file_unknown_extension_has_no_language() {
        let file = SourceFile::new("data.bin", "xyz");
        assert_eq!(file.language, None);
    }

    #[test]
    fn use_case_set_membership_and_order() {
        let set: UseCaseSet = [UseCase::Explanation, UseCase::BugFixing]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(UseCase::BugFixing));
        assert!(!set.contains(UseCase::CodeGeneration));

        let ordered: Vec<UseCase> = set.iter().collect();
        assert_eq!(ordered, vec![UseCase::BugFixing, UseCase::Explanation]);
    }

    #[test]
    fn use_case_set_all_is_full() {
        let set = UseCaseSet::all();
        assert_eq!(set.len(), 3);
        for use_case in UseCase::ALL {
            assert!(set.contains(use_case));
        }
    }

    #[test]
    fn use_case_set_serializes_as_list() {
        let set: UseCaseSet = [UseCase::CodeGeneration].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[\"CodeGeneration\"]");

        let back: UseCaseSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn line_range_count() {
        assert_eq!(LineRange::new(0, 2).line_count(), 3);
        assert_eq!(LineRange::new(5, 5).line_count(), 1);
    }

    #[test]
    fn metadata_builder() {
        let meta = ChunkMetadata::for_file("src/lib.rs")
            .language("rust")
            .line_range(LineRange::new(1, 4))
            .symbol_name("parse");

        assert_eq!(meta.file_path, "src/lib.rs");
        assert_eq!(meta.language.as_deref(), Some("rust"));
        assert_eq!(meta.line_range, Some(LineRange::new(1, 4)));
        assert_eq!(meta.symbol_name.as_deref(), Some("parse"));
    }
}
