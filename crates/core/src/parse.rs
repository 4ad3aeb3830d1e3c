//! Markdown parsing utilities and tree transform hooks.

use crate::{PipelineError, SourceFile, SourceLocation, to_unix_path};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Enable MDX constructs (JSX, ESM, expressions).
    pub mdx: bool,
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable YAML frontmatter parsing.
    pub frontmatter: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
    /// Allow raw HTML nodes in the AST.
    pub raw_html: bool,
}

impl ParseOptions {
    /// MDX-friendly defaults (JSX/ESM/expression enabled).
    pub const fn mdx() -> Self {
        Self {
            mdx: true,
            gfm: true,
            frontmatter: true,
            code_indented: false,
            raw_html: false,
        }
    }

    /// MDX without the frontmatter construct.
    ///
    /// A leading `---` block then parses as a thematic break followed by ordinary
    /// content, which is the tree shape older MDX loaders produced.
    pub const fn legacy_mdx() -> Self {
        Self {
            frontmatter: false,
            ..Self::mdx()
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            code_indented: self.code_indented,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.mdx {
            constructs.mdx_esm = true;
            constructs.mdx_expression_flow = true;
            constructs.mdx_expression_text = true;
            constructs.mdx_jsx_flow = true;
            constructs.mdx_jsx_text = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::legacy_mdx()
    }
}

/// Trait for rewriting a parsed document tree in place.
pub trait AstTransform {
    /// Mutate the document tree; an error aborts the document.
    fn transform(&self, root: &mut Node, file: &SourceFile) -> Result<(), PipelineError>;
}

impl<F> AstTransform for F
where
    F: Fn(&mut Node, &SourceFile) -> Result<(), PipelineError>,
{
    fn transform(&self, root: &mut Node, file: &SourceFile) -> Result<(), PipelineError> {
        (self)(root, file)
    }
}

/// Parses a document and runs registered tree transforms over it.
pub struct ParserPipeline {
    options: markdown::ParseOptions,
    ast_transforms: Vec<Box<dyn AstTransform + Send + Sync>>,
}

impl ParserPipeline {
    /// Create a new pipeline from markdown-rs parse options.
    pub fn new(options: markdown::ParseOptions) -> Self {
        Self {
            options,
            ast_transforms: Vec::new(),
        }
    }

    /// Add an AST transform. Transforms run in registration order.
    pub fn add_ast_transform<T: AstTransform + Send + Sync + 'static>(&mut self, transform: T) {
        self.ast_transforms.push(Box::new(transform));
    }

    /// Parse the file's source and apply every transform.
    pub fn run(&self, file: &SourceFile) -> Result<Node, PipelineError> {
        let mut root = parse_file(file, &self.options)?;
        for transform in &self.ast_transforms {
            transform.transform(&mut root, file)?;
        }
        Ok(root)
    }
}

impl Default for ParserPipeline {
    fn default() -> Self {
        Self::new(ParseOptions::default().to_markdown())
    }
}

/// Parse markdown into an MDAST tree using core options.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, PipelineError> {
    parse_mdast_with_options(input, &options.to_markdown())
}

/// Parse a source file. Parse errors carry the file's path in their location.
pub fn parse_source_file(file: &SourceFile, options: &ParseOptions) -> Result<Node, PipelineError> {
    parse_file(file, &options.to_markdown())
}

/// Parse markdown into an MDAST tree using markdown-rs `ParseOptions`.
pub fn parse_mdast_with_options(
    input: &str,
    options: &markdown::ParseOptions,
) -> Result<Node, PipelineError> {
    markdown::to_mdast(input, options).map_err(|err| {
        let (line, column) = message_point(&err);
        PipelineError::parse_error(err.to_string(), line, column)
    })
}

fn parse_file(file: &SourceFile, options: &markdown::ParseOptions) -> Result<Node, PipelineError> {
    parse_mdast_with_options(&file.value, options).map_err(|err| match (err, file.path()) {
        (PipelineError::MarkdownAdapter { message, location }, Some(path)) => {
            PipelineError::MarkdownAdapter {
                message,
                location: SourceLocation::with_file(
                    to_unix_path(path),
                    location.line,
                    location.column,
                ),
            }
        }
        (err, _) => err,
    })
}

fn message_point(message: &Message) -> (usize, usize) {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => (point.line, point.column),
            Place::Position(position) => (position.start.line, position.start.column),
        },
        None => (1, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_level(root: &Node) -> Vec<&'static str> {
        root.children()
            .map(|children| children.iter().map(kind).collect())
            .unwrap_or_default()
    }

    fn kind(node: &Node) -> &'static str {
        match node {
            Node::Yaml(_) => "yaml",
            Node::ThematicBreak(_) => "thematicBreak",
            Node::Heading(_) => "heading",
            Node::Paragraph(_) => "paragraph",
            Node::MdxjsEsm(_) => "mdxjsEsm",
            _ => "other",
        }
    }

    #[test]
    fn legacy_mdx_surfaces_frontmatter_as_break_and_heading() {
        let root = parse_mdast("---\ntitle: Hi\n---\n\n# Hi\n", &ParseOptions::legacy_mdx()).unwrap();
        assert_eq!(top_level(&root), ["thematicBreak", "heading", "heading"]);
    }

    #[test]
    fn mdx_preset_parses_yaml_node() {
        let root = parse_mdast("---\ntitle: Hi\n---\n\n# Hi\n", &ParseOptions::mdx()).unwrap();
        assert_eq!(top_level(&root), ["yaml", "heading"]);
    }

    #[test]
    fn mdx_parse_errors_carry_a_location() {
        let err = parse_mdast("# Title\n\n<a></b>\n", &ParseOptions::mdx()).unwrap_err();
        match err {
            PipelineError::MarkdownAdapter { location, .. } => {
                assert_eq!(location.line, 3);
                assert_eq!(location.file, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pipeline_parse_errors_name_the_file() {
        let file = SourceFile::new("/site", "/site/pages/broken.mdx", "# Title\n\n<a></b>\n");
        let err = ParserPipeline::default().run(&file).unwrap_err();
        match err {
            PipelineError::MarkdownAdapter { location, .. } => {
                assert_eq!(location.file.as_deref(), Some("/site/pages/broken.mdx"));
                assert_eq!(location.line, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pipeline_runs_transforms_in_order() {
        let mut pipeline = ParserPipeline::default();
        pipeline.add_ast_transform(|root: &mut Node, _: &SourceFile| -> Result<(), PipelineError> {
            if let Node::Root(root) = root {
                root.children.clear();
            }
            Ok(())
        });
        pipeline.add_ast_transform(|root: &mut Node, file: &SourceFile| -> Result<(), PipelineError> {
            if let Node::Root(root) = root {
                root.children.push(
                    crate::codegen::EsmFragment::ImportDefault {
                        local: "Page".into(),
                        source: file.resource_path("pages")?,
                    }
                    .into_node(),
                );
            }
            Ok(())
        });

        let file = SourceFile::new("/site", "/site/pages/a.mdx", "# A\n");
        let root = pipeline.run(&file).unwrap();
        assert_eq!(top_level(&root), ["mdxjsEsm"]);
    }

    #[test]
    fn pipeline_stops_at_first_error() {
        let mut pipeline = ParserPipeline::default();
        pipeline.add_ast_transform(|_: &mut Node, _: &SourceFile| -> Result<(), PipelineError> {
            Err(PipelineError::NotRoot)
        });
        pipeline.add_ast_transform(|_: &mut Node, _: &SourceFile| -> Result<(), PipelineError> {
            panic!("second transform must not run")
        });

        let file = SourceFile::new("/site", "/site/pages/a.mdx", "text");
        assert!(matches!(pipeline.run(&file), Err(PipelineError::NotRoot)));
    }
}
