#![deny(missing_docs)]
//! mdxlayout core: document parsing, front matter extraction, and ESM codegen.

/// ESM fragments and literal-to-expression conversion.
pub mod codegen;
/// Pipeline error and location types.
pub mod error;
/// Source file descriptor and resource paths.
pub mod file;
/// YAML frontmatter extraction helpers.
pub mod frontmatter;
/// Re-rendering rewritten trees and compiling them with mdxjs-rs.
pub mod mdx_compiler;
/// Markdown parsing utilities and tree transform hooks.
pub mod parse;

pub use codegen::{EsmFragment, Expr, js_string_literal, value_to_expr};
pub use error::{PipelineError, SourceLocation};
pub use file::{SourceFile, to_unix_path};
pub use frontmatter::{FrontmatterError, FrontmatterExtraction, FrontmatterMap, extract_frontmatter};
pub use mdx_compiler::{MdxCompileOptions, compile_mdx, render_mdx};
pub use parse::{
    AstTransform, ParseOptions, ParserPipeline, parse_mdast, parse_mdast_with_options,
    parse_source_file,
};
