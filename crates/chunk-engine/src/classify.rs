//! Use-case classification heuristics.
//!
//! Both entry points are total: when no rule matches, the full label set is
//! returned. Labels are over-inclusive on purpose — a false positive costs a
//! slightly noisier index, while a false negative hides code from a use case
//! entirely. That fallback is behavioral contract, not a default to tighten.

use crate::boundary::SymbolKind;
use crate::heuristics::{
    API_NAME_MARKERS, BUG_FIXING_NAME_HINTS, CODE_GENERATION_NAME_HINTS, CONVERSION_NAME_PREFIXES,
    DOC_NAME_MARKERS, NON_PUBLIC_NAME_MARKERS, TEST_PATH_MARKERS,
};
use crate::types::{SourceFile, UseCase, UseCaseSet};

/// Assigns consumer-intent labels to files and symbols
pub struct UseCaseClassifier;

impl UseCaseClassifier {
    /// Label a whole file by its path and name
    #[must_use]
    pub fn classify_file(file: &SourceFile) -> UseCaseSet {
        let path = file.relative_path.to_lowercase();
        let name = file.file_name().to_lowercase();

        let is_test = TEST_PATH_MARKERS
            .iter()
            .any(|marker| name.contains(marker) || path.contains(marker));
        let is_doc = DOC_NAME_MARKERS.iter().any(|marker| name.contains(marker))
            || name.ends_with(".md");
        let is_api = API_NAME_MARKERS.iter().any(|marker| name.contains(marker))
            || name.ends_with(".d.ts");

        let mut set = UseCaseSet::empty();

        if !is_test && !is_doc {
            set.insert(UseCase::BugFixing);
        }
        if is_api || name.contains("example") || is_test {
            set.insert(UseCase::CodeGeneration);
        }
        if is_doc || is_api || path.contains("public/") {
            set.insert(UseCase::Explanation);
        }

        Self::or_all(set)
    }

    /// Label an individual detected symbol by its name and kind
    #[must_use]
    pub fn classify_symbol(name: &str, kind: SymbolKind, file: &SourceFile) -> UseCaseSet {
        let name = name.to_lowercase();
        let path = file.relative_path.to_lowercase();
        let is_class = kind == SymbolKind::Class;

        let mut set = UseCaseSet::empty();

        if BUG_FIXING_NAME_HINTS.iter().any(|hint| name.contains(hint)) {
            set.insert(UseCase::BugFixing);
        }

        if CODE_GENERATION_NAME_HINTS.iter().any(|hint| name.contains(hint))
            || CONVERSION_NAME_PREFIXES.iter().any(|p| name.starts_with(p))
            || is_class
        {
            set.insert(UseCase::CodeGeneration);
        }

        let non_public = name.starts_with('_')
            || NON_PUBLIC_NAME_MARKERS.iter().any(|m| name.contains(m));
        if !non_public && (name.contains("public") || path.contains("public") || is_class) {
            set.insert(UseCase::Explanation);
        }

        Self::or_all(set)
    }

    /// Unknown inputs are assumed broadly relevant
    fn or_all(set: UseCaseSet) -> UseCaseSet {
        if set.is_empty() {
            UseCaseSet::all()
        } else {
            set
        }
    }
}
