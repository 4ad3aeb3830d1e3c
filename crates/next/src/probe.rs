//! Layout existence checks.
//!
//! The transform only needs to know *whether* a layout module exists; which
//! extension it has is left to the host's module resolver. The check sits
//! behind [`FileProbe`] so the transform can be driven without a filesystem.

use mdxlayout_core::{PipelineError, to_unix_path};
use std::fmt;
use std::path::{Path, PathBuf};
use wax::Glob;

/// Files named `<stem>.<ext>` inside `directory`, for any of `extensions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPattern {
    /// Directory searched (not recursively).
    pub directory: PathBuf,
    /// File name without extension.
    pub stem: String,
    /// Accepted extensions, without the leading dot.
    pub extensions: Vec<String>,
}

impl LayoutPattern {
    /// Splits an extension-less candidate path into directory and stem.
    pub fn for_candidate(candidate: &Path, extensions: &[String]) -> Self {
        let directory = candidate
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let stem = candidate
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            directory,
            stem,
            extensions: extensions.to_vec(),
        }
    }

    /// Glob relative to [`directory`](Self::directory), e.g. `index.{js,jsx,ts,tsx}`.
    pub fn glob(&self) -> String {
        let stem = escape_glob(&self.stem);
        match self.extensions.as_slice() {
            [single] => format!("{}.{}", stem, escape_glob(single)),
            many => {
                let alternatives: Vec<String> = many.iter().map(|ext| escape_glob(ext)).collect();
                format!("{}.{{{}}}", stem, alternatives.join(","))
            }
        }
    }
}

impl fmt::Display for LayoutPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let directory = to_unix_path(&self.directory);
        if directory.is_empty() {
            write!(f, "{}", self.glob())
        } else {
            write!(f, "{}/{}", directory.trim_end_matches('/'), self.glob())
        }
    }
}

/// Answers whether any file matches a layout pattern.
pub trait FileProbe {
    /// Returns true when at least one file matches.
    fn exists(&self, pattern: &LayoutPattern) -> Result<bool, PipelineError>;
}

impl<F> FileProbe for F
where
    F: Fn(&LayoutPattern) -> Result<bool, PipelineError>,
{
    fn exists(&self, pattern: &LayoutPattern) -> Result<bool, PipelineError> {
        (self)(pattern)
    }
}

/// Filesystem probe backed by `wax` globs.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobProbe;

impl FileProbe for GlobProbe {
    fn exists(&self, pattern: &LayoutPattern) -> Result<bool, PipelineError> {
        if pattern.extensions.is_empty() || !pattern.directory.is_dir() {
            return Ok(false);
        }

        let expression = pattern.glob();
        let glob = Glob::new(&expression)
            .map_err(|err| PipelineError::filesystem(pattern.to_string(), err.to_string()))?;

        // First match wins; the concrete file is resolved later by the host.
        match glob.walk(&pattern.directory).next() {
            Some(Ok(_)) => Ok(true),
            Some(Err(err)) => Err(PipelineError::filesystem(
                pattern.to_string(),
                err.to_string(),
            )),
            None => Ok(false),
        }
    }
}

/// Escapes glob metacharacters so `text` only matches itself.
///
/// ```
/// use mdxlayout_next::probe::escape_glob;
///
/// assert_eq!(escape_glob("docs"), "docs");
/// assert_eq!(escape_glob("a{b}*"), "a\\{b\\}\\*");
/// ```
pub fn escape_glob(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(
            ch,
            '?' | '*' | '$' | ':' | '<' | '>' | '(' | ')' | '[' | ']' | '{' | '}' | ',' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
