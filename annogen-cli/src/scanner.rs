//! Discovery of Rust source files under an input directory.
//!
//! Walks with the `ignore` crate so `.gitignore` rules apply, keeps `.rs`
//! files matching the optional include glob, and returns them sorted by
//! relative path so runs are reproducible.

use crate::error::{CliResult, ScanError};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// A discovered source file with its content.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as found on disk.
    pub path: PathBuf,

    /// Path relative to the scan root.
    pub relative_path: PathBuf,

    pub content: String,
}

impl SourceFile {
    /// Build a source file from in-memory content.
    pub fn from_content(relative_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let relative_path = relative_path.into();
        Self {
            path: relative_path.clone(),
            relative_path,
            content: content.into(),
        }
    }
}

/// Scanner for Rust source files.
#[derive(Debug)]
pub struct SourceScanner {
    root: PathBuf,
    respect_gitignore: bool,
    include: Option<glob::Pattern>,
}

impl SourceScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            respect_gitignore: true,
            include: None,
        }
    }

    /// Set whether `.gitignore` files are honored.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Only keep files whose relative path matches `pattern`.
    pub fn with_filter(mut self, pattern: &str) -> Result<Self, ScanError> {
        let pattern = glob::Pattern::new(pattern)
            .map_err(|e| ScanError::invalid_pattern(pattern, e.to_string()))?;
        self.include = Some(pattern);
        Ok(self)
    }

    /// Scan the root and read every matching `.rs` file.
    ///
    /// An empty result is not an error; the caller decides how to report it.
    pub fn scan(&self) -> CliResult<Vec<SourceFile>> {
        if !self.root.is_dir() {
            return Err(ScanError::not_found(self.root.clone()).into());
        }

        let walker = WalkBuilder::new(&self.root)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .hidden(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(ScanError::Walk)?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) || !is_rust_file(path) {
                continue;
            }

            let relative_path = self.relative_path(path);
            if !self.matches(&relative_path) {
                tracing::trace!(path = %relative_path.display(), "excluded by filter");
                continue;
            }

            let content = std::fs::read_to_string(path).map_err(|e| ScanError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

            files.push(SourceFile {
                path: path.to_path_buf(),
                relative_path,
                content,
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        tracing::debug!(root = %self.root.display(), files = files.len(), "scanned sources");
        Ok(files)
    }

    fn matches(&self, relative_path: &Path) -> bool {
        self.include
            .as_ref()
            .map_or(true, |pattern| pattern.matches_path(relative_path))
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_rust_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rs")
}
