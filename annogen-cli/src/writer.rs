//! Materializes write directives under the output root.

use crate::error::WriteError;
use annogen::WriteDirective;
use std::path::{Component, Path, PathBuf};

/// Result of writing one directive.
#[derive(Debug)]
pub enum WriteResult {
    /// File was written.
    Written { path: PathBuf, bytes: usize },

    /// The file existed and the directive asked to keep it.
    Skipped { path: PathBuf },

    /// Dry run; nothing touched the filesystem.
    DryRun { path: PathBuf, content: String },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. }
            | WriteResult::Skipped { path }
            | WriteResult::DryRun { path, .. } => path,
        }
    }

    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Bytes written (0 unless written).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            _ => 0,
        }
    }
}

/// File writer rooted at an output directory.
#[derive(Debug)]
pub struct FileWriter {
    root: PathBuf,
    dry_run: bool,
}

impl FileWriter {
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            dry_run,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Resolve a directive's target path under the root.
    ///
    /// Rejects absolute directories, `..` components and file names that are
    /// not a single path segment.
    pub fn resolve(&self, directive: &WriteDirective) -> Result<PathBuf, WriteError> {
        if directive.is_absolute() {
            return Err(WriteError::AbsolutePath {
                path: directive.relative_path(),
            });
        }

        let mut file_components = Path::new(&directive.file_name).components();
        match (file_components.next(), file_components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return Err(WriteError::InvalidFileName {
                    name: directive.file_name.clone(),
                })
            }
        }

        let relative = directive.relative_path();
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => {
                    return Err(WriteError::EscapesRoot { path: relative })
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(WriteError::AbsolutePath { path: relative })
                }
            }
        }

        Ok(self.root.join(relative))
    }

    /// Write one directive, consuming its content stream.
    pub fn write(&self, mut directive: WriteDirective) -> Result<WriteResult, WriteError> {
        let path = self.resolve(&directive)?;

        if directive.dont_override && path.exists() {
            tracing::warn!(path = %path.display(), "keeping existing file");
            return Ok(WriteResult::Skipped { path });
        }

        let content = directive
            .read_content()
            .map_err(|e| WriteError::ReadContent {
                path: path.clone(),
                source: e,
            })?;

        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: String::from_utf8_lossy(&content).into_owned(),
                path,
            });
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(&path, &content).map_err(|e| WriteError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(WriteResult::Written {
            path,
            bytes: content.len(),
        })
    }

    /// Write every directive, returning one result per directive in order.
    pub fn write_all(
        &self,
        directives: Vec<WriteDirective>,
    ) -> Vec<Result<WriteResult, WriteError>> {
        directives.into_iter().map(|d| self.write(d)).collect()
    }
}
