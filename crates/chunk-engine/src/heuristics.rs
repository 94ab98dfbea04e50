//! Static heuristic tables shared by the filter and the classifiers.
//!
//! Kept as data rather than scattered literals so individual rules can be
//! tested and extended without touching the matching logic.

/// Hard cap on file size; larger blobs are never embedded
pub const MAX_FILE_BYTES: usize = 2_097_152; // 2 MiB

/// Fraction of control characters above which content is treated as binary
pub const BINARY_CONTROL_RATIO: f64 = 0.10;

/// Path fragments that disqualify a file from chunking (case-sensitive
/// substring match against the relative path)
pub const SKIP_PATH_FRAGMENTS: &[&str] = &[
    ".git/",
    "node_modules/",
    ".DS_Store",
    ".env",
    ".log",
    ".lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
];

/// Markers identifying test files (matched against the lowercased path)
pub const TEST_PATH_MARKERS: &[&str] = &["test", "spec", "test/", "tests/", "__tests__/"];

/// Markers identifying documentation files (matched against the lowercased
/// file name)
pub const DOC_NAME_MARKERS: &[&str] = &["readme", "documentation", "docs"];

/// Markers identifying API surface files (matched against the lowercased
/// file name)
pub const API_NAME_MARKERS: &[&str] = &["api", "interface", "contract"];

/// Symbol-name substrings suggesting bug-fixing relevance
pub const BUG_FIXING_NAME_HINTS: &[&str] = &["error", "exception", "handle", "process", "validate"];

/// Symbol-name substrings suggesting code-generation relevance
pub const CODE_GENERATION_NAME_HINTS: &[&str] = &["create", "build", "new", "get", "generate"];

/// Symbol-name prefixes suggesting conversion helpers (code-generation)
pub const CONVERSION_NAME_PREFIXES: &[&str] = &["to", "from"];

/// Symbol-name substrings marking a symbol as non-public-facing
pub const NON_PUBLIC_NAME_MARKERS: &[&str] = &["internal", "private"];

/// Is the character a control character the binary heuristic counts?
///
/// Tab, LF and CR are ordinary text; everything else below 0x20 plus DEL
/// counts toward the binary ratio.
pub fn is_suspect_control_char(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_char_classification() {
        assert!(is_suspect_control_char('\u{00}'));
        assert!(is_suspect_control_char('\u{08}'));
        assert!(is_suspect_control_char('\u{0B}'));
        assert!(is_suspect_control_char('\u{1F}'));
        assert!(is_suspect_control_char('\u{7F}'));

        assert!(!is_suspect_control_char('\t'));
        assert!(!is_suspect_control_char('\n'));
        assert!(!is_suspect_control_char('\r'));
        assert!(!is_suspect_control_char('a'));
    }

    #[test]
    fn skip_fragments_cover_lockfiles() {
        assert!(SKIP_PATH_FRAGMENTS.contains(&"package-lock.json"));
        assert!(SKIP_PATH_FRAGMENTS.contains(&"node_modules/"));
    }
}
