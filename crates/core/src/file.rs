//! Source file descriptor handed to tree transforms.

use crate::PipelineError;
use std::path::{Path, PathBuf};

/// A document being compiled: where it lives and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Working directory of the build.
    pub cwd: PathBuf,
    /// Raw source text.
    pub value: String,
    /// Paths the file has had, oldest first. The first entry is the original source path.
    pub history: Vec<PathBuf>,
}

impl SourceFile {
    /// Creates a descriptor for an in-memory document.
    pub fn new(cwd: impl Into<PathBuf>, path: impl Into<PathBuf>, value: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            value: value.into(),
            history: vec![path.into()],
        }
    }

    /// Reads a document from disk. Relative paths are taken from `cwd`.
    pub fn read(cwd: impl Into<PathBuf>, path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let cwd = cwd.into();
        let path = cwd.join(path.as_ref());
        let value = std::fs::read_to_string(&path)?;
        Ok(Self {
            cwd,
            value,
            history: vec![path],
        })
    }

    /// The original source path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.history.first().map(PathBuf::as_path)
    }

    /// Derives the document's path relative to `cwd/<content_dir>`.
    ///
    /// The first occurrence of the content root is cut out of the original path and the
    /// character after it (normally the separator) is dropped. No other normalization
    /// happens before the cut; separators are forward slashes afterwards.
    pub fn resource_path(&self, content_dir: &str) -> Result<String, PipelineError> {
        let source = self.path().ok_or(PipelineError::MissingSourcePath)?;
        let source = source.to_string_lossy();
        let root = self.cwd.join(content_dir);
        let root = root.to_string_lossy();

        let remainder = source.replacen(root.as_ref(), "", 1);
        let mut chars = remainder.chars();
        chars.next();
        Ok(to_unix_path(Path::new(chars.as_str())))
    }
}

/// Converts backslash separators to forward slashes.
pub fn to_unix_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
