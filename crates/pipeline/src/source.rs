use crate::error::{PipelineError, Result};
use ignore::WalkBuilder;
use repochunk_engine::{RepositoryRef, SourceFile};
use std::path::{Path, PathBuf};

/// Provider of the fully materialized, ordered file set for one repository.
///
/// Clone/pull mechanics live behind this trait; the pipeline only consumes
/// the resulting sequence.
pub trait RepositorySource {
    /// The repository this source serves
    fn repository(&self) -> &RepositoryRef;

    /// Collect every eligible file, in a stable order
    fn collect(&self) -> Result<Vec<SourceFile>>;
}

/// Source backed by an already-fetched checkout on local disk.
///
/// Walks the directory gitignore-aware, skipping hidden files; unreadable or
/// non-UTF-8 entries are logged and dropped, never fatal.
pub struct LocalCheckoutSource {
    root: PathBuf,
    repository: RepositoryRef,
}

impl LocalCheckoutSource {
    pub fn new(root: impl AsRef<Path>, repository: RepositoryRef) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(PipelineError::InvalidPath(format!(
                "Not a directory: {}",
                root.display()
            )));
        }

        Ok(Self { root, repository })
    }

    fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

impl RepositorySource for LocalCheckoutSource {
    fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    fn collect(&self) -> Result<Vec<SourceFile>> {
        let mut paths = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false)
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    let is_file = entry.file_type().is_some_and(|t| t.is_file());
                    if is_file {
                        paths.push(entry.into_path());
                    }
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        // The walk order is platform-dependent; sort for a deterministic
        // file sequence (process_files preserves whatever order it is given).
        paths.sort();

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    files.push(SourceFile::new(self.relative_path(&path), content));
                }
                Err(e) => {
                    log::debug!("Skipping unreadable file {}: {e}", path.display());
                }
            }
        }

        log::info!(
            "Collected {} files from {}",
            files.len(),
            self.root.display()
        );
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn repo() -> RepositoryRef {
        RepositoryRef::parse("https://github.com/acme/widgets").unwrap()
    }

    #[test]
    fn rejects_missing_directory() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");
        assert!(LocalCheckoutSource::new(&missing, repo()).is_err());
    }

    #[test]
    fn collects_files_in_sorted_relative_order() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/z.rs"), "fn z() {}").unwrap();
        fs::write(temp.path().join("src/a.rs"), "fn a() {}").unwrap();
        fs::write(temp.path().join("README.md"), "# Readme").unwrap();

        let source = LocalCheckoutSource::new(temp.path(), repo()).unwrap();
        let files = source.collect().unwrap();

        let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["README.md", "src/a.rs", "src/z.rs"]);
    }

    #[test]
    fn skips_gitignored_and_hidden_files() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".gitignore"), "generated/\n").unwrap();
        fs::create_dir_all(temp.path().join("generated")).unwrap();
        fs::write(temp.path().join("generated/out.rs"), "fn g() {}").unwrap();
        fs::write(temp.path().join(".hidden.rs"), "fn h() {}").unwrap();
        fs::write(temp.path().join("main.rs"), "fn main() {}").unwrap();

        let source = LocalCheckoutSource::new(temp.path(), repo()).unwrap();
        let files = source.collect().unwrap();

        let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["main.rs"]);
    }

    #[test]
    fn non_utf8_files_are_dropped_not_fatal() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("blob.rs"), [0xFF, 0xFE, 0x00, 0x41]).unwrap();
        fs::write(temp.path().join("ok.rs"), "fn ok() {}").unwrap();

        let source = LocalCheckoutSource::new(temp.path(), repo()).unwrap();
        let files = source.collect().unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "ok.rs");
    }
}
