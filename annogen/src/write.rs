//! Virtual file outputs produced by generators.

use std::fmt;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// Byte stream producing a file's content.
pub type Content = Box<dyn Read + Send>;

/// A file a generator wants written.
///
/// `dir` is relative to the generation target. Writers reject absolute paths.
/// The content stream is read exactly once by the writer.
pub struct WriteDirective {
    /// Target sub-directory, relative.
    pub dir: PathBuf,

    /// File name inside `dir`.
    pub file_name: String,

    /// Content stream.
    pub content: Content,

    /// Leave an existing file untouched.
    pub dont_override: bool,
}

impl WriteDirective {
    /// Create a write directive from in-memory content.
    pub fn new(
        dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self::from_reader(dir, file_name, Cursor::new(content.into()))
    }

    /// Create a write directive from any byte stream.
    pub fn from_reader(
        dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
        reader: impl Read + Send + 'static,
    ) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
            content: Box::new(reader),
            dont_override: false,
        }
    }

    /// Set whether an existing file must be kept.
    pub fn dont_override(mut self, dont_override: bool) -> Self {
        self.dont_override = dont_override;
        self
    }

    /// Relative path of the file (`dir/file_name`).
    pub fn relative_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Whether `dir` is absolute, which writers must refuse.
    pub fn is_absolute(&self) -> bool {
        self.dir.is_absolute() || Path::new(&self.file_name).is_absolute()
    }

    /// Drain the content stream into memory.
    pub fn read_content(&mut self) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.content.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl fmt::Debug for WriteDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteDirective")
            .field("dir", &self.dir)
            .field("file_name", &self.file_name)
            .field("dont_override", &self.dont_override)
            .finish_non_exhaustive()
    }
}
