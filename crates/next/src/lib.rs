#![deny(missing_docs)]
//! Next.js-style MDX pages: front matter exports and layout wrapping.
//!
//! [`FrontMatterLayout`] rewrites a parsed document so the compiled module
//! exports its front matter as `frontMatter` and, when a layout module exists,
//! default-exports the page wrapped in that layout.

/// Compiling many pages in parallel.
pub mod batch;
/// Typed front matter view and reserved keys.
pub mod front_matter;
/// Transform configuration.
pub mod options;
/// Single page compilation.
pub mod page;
/// Layout existence checks.
pub mod probe;
/// Leftover front matter removal.
pub mod strip;
/// The front matter / layout transform.
pub mod transform;

pub use batch::{BatchOptions, BatchProcessingResult, BatchResult, BatchStats, compile_batch};
pub use front_matter::{FrontMatter, is_truthy};
pub use options::LayoutOptions;
pub use page::{PageOutput, compile_page, compile_page_file};
pub use probe::{FileProbe, GlobProbe, LayoutPattern};
pub use strip::strip_legacy_frontmatter;
pub use transform::{FrontMatterLayout, TransformReport};
