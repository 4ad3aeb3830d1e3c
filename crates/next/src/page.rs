//! Compiling one page end to end: parse, transform, compile.

use crate::front_matter::FrontMatter;
use crate::probe::FileProbe;
use crate::transform::FrontMatterLayout;
use mdxlayout_core::{
    ParseOptions, PipelineError, SourceFile, compile_mdx, parse_source_file, render_mdx,
    to_unix_path,
};
use std::path::{Path, PathBuf};

/// A compiled page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutput {
    /// JavaScript module produced by the MDX compiler.
    pub code: String,
    /// Path of the page relative to the pages directory.
    pub resource_path: String,
    /// Exported front matter.
    pub front_matter: FrontMatter,
    /// Import source of the wrapping layout, if any.
    pub layout: Option<String>,
}

impl PageOutput {
    /// Exported front matter as a JSON string.
    pub fn front_matter_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.front_matter.to_value())
    }
}

/// Compiles an in-memory page.
pub fn compile_page<P: FileProbe>(
    file: &SourceFile,
    transform: &FrontMatterLayout<P>,
) -> Result<PageOutput, PipelineError> {
    let mut tree = parse_source_file(file, &ParseOptions::legacy_mdx())?;
    let report = transform.apply(&mut tree, file)?;
    let mdx = render_mdx(&tree, &file.value)?;

    let filepath = file
        .path()
        .map(to_unix_path)
        .unwrap_or_else(|| report.resource_path.clone());
    let code = compile_mdx(&mdx, &filepath, &transform.options().compile_options())?;

    Ok(PageOutput {
        code,
        resource_path: report.resource_path,
        front_matter: report.front_matter,
        layout: report.layout,
    })
}

/// Reads and compiles a page from disk. Relative paths are taken from `cwd`.
pub fn compile_page_file<P: FileProbe>(
    cwd: impl Into<PathBuf>,
    path: impl AsRef<Path>,
    transform: &FrontMatterLayout<P>,
) -> Result<PageOutput, PipelineError> {
    let file = SourceFile::read(cwd, path)?;
    compile_page(&file, transform)
}
