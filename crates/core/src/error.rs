use crate::frontmatter::FrontmatterError;
use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: String, line: usize, column: usize) -> Self {
        Self {
            file: Some(file),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors that abort the processing of a single document.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// IO error while reading a source document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    MarkdownAdapter {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// The front matter block is present but malformed.
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
    /// The file descriptor carries no input path.
    #[error("File history is empty: no source path to derive a resource path from")]
    MissingSourcePath,
    /// The transform was handed something other than a document root.
    #[error("Expected a root node at the top of the document tree")]
    NotRoot,
    /// The `layout` front matter key is set but is not a string.
    #[error("Front matter `layout` must be a string, got {value}")]
    InvalidLayout {
        /// JSON rendering of the offending value
        value: String,
    },
    /// The layout existence check failed.
    #[error("Failed to check for files matching {pattern}: {message}")]
    Filesystem {
        /// Glob pattern that was being matched
        pattern: String,
        /// Underlying failure
        message: String,
    },
    /// The mutated tree could not be turned back into MDX text.
    #[error("Render error: {message}")]
    Render {
        /// Error message
        message: String,
    },
    /// mdxjs-rs rejected the document.
    #[error("MDX compilation error: {message}")]
    Compile {
        /// Error message
        message: String,
    },
}

impl PipelineError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::MarkdownAdapter {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Create a render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create a filesystem error for a glob pattern
    pub fn filesystem(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Filesystem {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Returns true for failures caused by the document's own content,
    /// as opposed to the environment it was compiled in.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            Self::MarkdownAdapter { .. }
                | Self::Frontmatter(_)
                | Self::InvalidLayout { .. }
                | Self::Compile { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_with_and_without_file() {
        assert_eq!(SourceLocation::new(3, 7).to_string(), "3:7");
        assert_eq!(
            SourceLocation::with_file("pages/a.mdx".into(), 1, 2).to_string(),
            "pages/a.mdx:1:2"
        );
    }

    #[test]
    fn frontmatter_errors_keep_their_message() {
        let err: PipelineError = FrontmatterError::InvalidRootType.into();
        assert_eq!(
            err.to_string(),
            "Frontmatter must be a YAML mapping at the top level"
        );
        assert!(err.is_document_error());
    }

    #[test]
    fn filesystem_errors_are_not_document_errors() {
        let err = PipelineError::filesystem("/site/layouts/index.{js,jsx}", "permission denied");
        assert!(!err.is_document_error());
        assert!(err.to_string().contains("permission denied"));
    }
}
