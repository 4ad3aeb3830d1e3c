//! Front matter export and layout wrapping for a single document tree.
//!
//! The transform runs once per document and, in order:
//!
//! 1. derives the document's resource path,
//! 2. extracts its front matter and sets `__resourcePath`,
//! 3. appends `export const frontMatter = {...}`,
//! 4. strips front matter left in the body by the parser,
//! 5. unless `noDefaultLayout` is truthy, and a layout module exists, appends
//!    `import Layout from "<layout>"` and a default export wrapping the page
//!    in `<Layout frontMatter={frontMatter}>`.

use crate::front_matter::FrontMatter;
use crate::options::LayoutOptions;
use crate::probe::{FileProbe, GlobProbe, LayoutPattern};
use crate::strip::strip_legacy_frontmatter;
use markdown::mdast::Node;
use mdxlayout_core::{
    AstTransform, EsmFragment, Expr, PipelineError, SourceFile, extract_frontmatter, to_unix_path,
    value_to_expr,
};
use std::path::{Component, Path, PathBuf};

/// What the transform did to one document.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformReport {
    /// Path of the document relative to the pages directory.
    pub resource_path: String,
    /// Front matter as exported, `__resourcePath` included.
    pub front_matter: FrontMatter,
    /// Number of leading nodes removed as leftover front matter.
    pub stripped: usize,
    /// Import source of the injected layout, if one was injected.
    pub layout: Option<String>,
}

/// The front matter / layout transform.
#[derive(Debug, Clone, Default)]
pub struct FrontMatterLayout<P = GlobProbe> {
    options: LayoutOptions,
    probe: P,
}

impl FrontMatterLayout<GlobProbe> {
    /// Creates a transform that checks for layouts on the filesystem.
    pub fn new(options: LayoutOptions) -> Self {
        Self::with_probe(options, GlobProbe)
    }
}

impl<P: FileProbe> FrontMatterLayout<P> {
    /// Creates a transform with a custom existence check.
    pub fn with_probe(options: LayoutOptions, probe: P) -> Self {
        Self { options, probe }
    }

    /// Transform configuration.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Rewrites `tree` for `file`.
    pub fn apply(&self, tree: &mut Node, file: &SourceFile) -> Result<TransformReport, PipelineError> {
        let Node::Root(root) = tree else {
            return Err(PipelineError::NotRoot);
        };

        let resource_path = file.resource_path(&self.options.pages_dir)?;
        log::debug!("processing file: {}", resource_path);

        let front_matter = FrontMatter::from_extraction(extract_frontmatter(&file.value)?)
            .with_resource_path(resource_path.clone());
        log::debug!("extracted front matter: {}", front_matter.to_value());

        root.children.push(
            EsmFragment::ExportConst {
                name: self.options.front_matter_export.clone(),
                init: value_to_expr(&front_matter.to_value()),
            }
            .into_node(),
        );

        let stripped = strip_legacy_frontmatter(&mut root.children);
        if stripped > 0 {
            log::trace!("stripped {} leading front matter nodes", stripped);
        }

        let layout = if front_matter.no_default_layout() {
            log::debug!("noDefaultLayout set, skipping layout for {}", resource_path);
            None
        } else {
            self.inject_layout(&mut root.children, file, &front_matter)?
        };

        Ok(TransformReport {
            resource_path,
            front_matter,
            stripped,
            layout,
        })
    }

    /// Resolves the layout candidate path for a document, without checking it exists.
    pub fn layout_candidate(
        &self,
        file: &SourceFile,
        front_matter: &FrontMatter,
    ) -> Result<PathBuf, PipelineError> {
        let name = front_matter.layout_name(&self.options.default_layout)?;
        let joined = file.cwd.join(&self.options.layouts_dir).join(name);
        let absolute = std::path::absolute(&joined)?;
        Ok(normalize_lexically(&absolute))
    }

    fn inject_layout(
        &self,
        children: &mut Vec<Node>,
        file: &SourceFile,
        front_matter: &FrontMatter,
    ) -> Result<Option<String>, PipelineError> {
        let candidate = self.layout_candidate(file, front_matter)?;
        let pattern = LayoutPattern::for_candidate(&candidate, &self.options.layout_extensions);
        log::debug!("checking for layout at {}", pattern);

        if !self.probe.exists(&pattern)? {
            log::debug!("no layout matches {}, leaving page unwrapped", pattern);
            return Ok(None);
        }

        let source = to_unix_path(&candidate);
        let component = self.options.layout_identifier.clone();
        children.push(
            EsmFragment::ImportDefault {
                local: component.clone(),
                source: source.clone(),
            }
            .into_node(),
        );
        children.push(
            EsmFragment::ExportDefaultLayout {
                component,
                attributes: vec![(
                    self.options.front_matter_export.clone(),
                    Expr::ident(self.options.front_matter_export.as_str()),
                )],
            }
            .into_node(),
        );
        log::debug!("wrapped page in layout {}", source);

        Ok(Some(source))
    }
}

impl<P: FileProbe> AstTransform for FrontMatterLayout<P> {
    fn transform(&self, root: &mut Node, file: &SourceFile) -> Result<(), PipelineError> {
        self.apply(root, file).map(|_| ())
    }
}

/// Collapses `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
