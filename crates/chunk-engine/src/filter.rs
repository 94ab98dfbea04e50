use crate::heuristics::{
    is_suspect_control_char, BINARY_CONTROL_RATIO, MAX_FILE_BYTES, SKIP_PATH_FRAGMENTS,
};
use crate::types::SourceFile;

/// Decides whether a file is eligible for chunking at all.
///
/// Pure predicate over the file's path, size and content; no side effects.
pub struct FileFilter;

impl FileFilter {
    /// Should this file contribute no chunks?
    #[must_use]
    pub fn should_skip(file: &SourceFile) -> bool {
        if file.content.trim().is_empty() {
            log::debug!("Skipping empty file {}", file.relative_path);
            return true;
        }

        if file.byte_size > MAX_FILE_BYTES {
            log::debug!(
                "Skipping large file {} ({} bytes > {})",
                file.relative_path,
                file.byte_size,
                MAX_FILE_BYTES
            );
            return true;
        }

        if Self::looks_binary(&file.content) {
            log::debug!("Skipping binary file {}", file.relative_path);
            return true;
        }

        if Self::is_denied_path(&file.relative_path) {
            log::debug!("Skipping denylisted path {}", file.relative_path);
            return true;
        }

        false
    }

    /// Binary heuristic: a null byte, or too many control characters
    fn looks_binary(content: &str) -> bool {
        if content.contains('\u{00}') {
            return true;
        }

        let total = content.chars().count();
        if total == 0 {
            return false;
        }

        let control = content.chars().filter(|c| is_suspect_control_char(*c)).count();
        (control as f64) / (total as f64) > BINARY_CONTROL_RATIO
    }

    fn is_denied_path(path: &str) -> bool {
        SKIP_PATH_FRAGMENTS
            .iter()
            .any(|fragment| path.contains(fragment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_empty_and_whitespace_content() {
        assert!(FileFilter::should_skip(&SourceFile::new("a.rs", "")));
        assert!(FileFilter::should_skip(&SourceFile::new("a.rs", "  \n\t ")));
        assert!(!FileFilter::should_skip(&SourceFile::new("a.rs", "fn a() {}")));
    }

    #[test]
    fn skips_oversized_files() {
        let big = "x".repeat(MAX_FILE_BYTES + 1);
        assert!(FileFilter::should_skip(&SourceFile::new("big.rs", big)));

        let at_limit = "x".repeat(MAX_FILE_BYTES);
        assert!(!FileFilter::should_skip(&SourceFile::new("ok.rs", at_limit)));
    }

    #[test]
    fn skips_null_byte_regardless_of_extension() {
        let file = SourceFile::new("image.rs", "fn main\u{00}() {}");
        assert!(FileFilter::should_skip(&file));
    }

    #[test]
    fn skips_control_heavy_content() {
        // 3 control chars out of 10 total is well above the 10% threshold.
        let file = SourceFile::new("blob.txt", "ab\u{01}\u{02}\u{03}cdefg");
        assert!(FileFilter::should_skip(&file));
    }

    #[test]
    fn tolerates_ordinary_whitespace_controls() {
        let file = SourceFile::new("a.py", "def a():\n\treturn 1\r\n");
        assert!(!FileFilter::should_skip(&file));
    }

    #[test]
    fn skips_denylisted_paths() {
        for path in [
            "node_modules/left-pad/index.js",
            "sub/.git/config",
            "deps/package-lock.json",
            "secrets/.env",
            "build/output.log",
            "Cargo.lock",
        ] {
            assert!(
                FileFilter::should_skip(&SourceFile::new(path, "content")),
                "expected {path} to be skipped"
            );
        }
    }

    #[test]
    fn denylist_is_case_sensitive() {
        let file = SourceFile::new("NODE_MODULES/x.js", "var a = 1;");
        assert!(!FileFilter::should_skip(&file));
    }
}
