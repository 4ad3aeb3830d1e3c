//! MDX compilation using mdxjs-rs.
//!
//! mdxjs-rs compiles MDX text, not trees, so a rewritten tree is first turned
//! back into MDX: original nodes are copied from the source by position and
//! generated ESM nodes contribute their code as separate blocks.

use crate::PipelineError;
use markdown::mdast::Node;
use mdxjs::{JsxRuntime, MdxParseOptions, Options, compile};

/// Configuration options for MDX compilation.
#[derive(Debug, Clone, Default)]
pub struct MdxCompileOptions {
    /// The JSX import source (defaults to React's when unset).
    pub jsx_import_source: Option<String>,
    /// Whether to output JSX instead of function calls.
    pub jsx: bool,
}

/// Turns a (possibly rewritten) root back into MDX text.
///
/// `source` must be the text the tree was parsed from. Front matter nodes are
/// omitted; the compiler receives front matter through the generated exports.
pub fn render_mdx(root: &Node, source: &str) -> Result<String, PipelineError> {
    let Node::Root(root) = root else {
        return Err(PipelineError::NotRoot);
    };

    let mut out = String::with_capacity(source.len() + 256);
    // End offset of the previous node when it was copied from the source.
    let mut previous_end: Option<usize> = None;

    for child in &root.children {
        match child {
            Node::Yaml(_) | Node::Toml(_) => {
                previous_end = None;
            }
            Node::MdxjsEsm(esm) if esm.position.is_none() => {
                push_block_separator(&mut out);
                out.push_str(&esm.value);
                previous_end = None;
            }
            other => {
                let position = other.position().ok_or_else(|| {
                    PipelineError::render_error(format!(
                        "generated {} node has no source position",
                        node_kind(other)
                    ))
                })?;
                let (start, end) = (position.start.offset, position.end.offset);

                match previous_end {
                    Some(gap_start) if gap_start <= start => {
                        out.push_str(slice(source, gap_start, start)?);
                    }
                    _ => push_block_separator(&mut out),
                }
                out.push_str(slice(source, start, end)?);
                previous_end = Some(end);
            }
        }
    }

    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Compiles MDX text to a JavaScript module with the automatic JSX runtime.
///
/// # Example
///
/// ```ignore
/// use mdxlayout_core::mdx_compiler::{compile_mdx, MdxCompileOptions};
///
/// let code = compile_mdx("# Hello\n", "pages/index.mdx", &MdxCompileOptions::default())?;
/// assert!(code.contains("MDXContent"));
/// ```
pub fn compile_mdx(
    mdx: &str,
    filepath: &str,
    options: &MdxCompileOptions,
) -> Result<String, PipelineError> {
    let mdx_options = Options {
        filepath: Some(filepath.to_string()),
        jsx_runtime: Some(JsxRuntime::Automatic),
        jsx_import_source: options.jsx_import_source.clone(),
        jsx: options.jsx,
        parse: MdxParseOptions::gfm(),
        ..Default::default()
    };

    log::trace!("compiling {} ({} bytes of MDX)", filepath, mdx.len());
    compile(mdx, &mdx_options).map_err(|err| PipelineError::Compile {
        message: err.to_string(),
    })
}

fn push_block_separator(out: &mut String) {
    if out.is_empty() {
        return;
    }
    while !out.ends_with("\n\n") {
        out.push('\n');
    }
}

fn slice(source: &str, start: usize, end: usize) -> Result<&str, PipelineError> {
    source.get(start..end).ok_or_else(|| {
        PipelineError::render_error(format!(
            "node range {}..{} is outside the {}-byte source",
            start,
            end,
            source.len()
        ))
    })
}

fn node_kind(node: &Node) -> &'static str {
    match node {
        Node::Paragraph(_) => "paragraph",
        Node::Heading(_) => "heading",
        Node::ThematicBreak(_) => "thematicBreak",
        Node::Code(_) => "code",
        Node::List(_) => "list",
        Node::Blockquote(_) => "blockquote",
        Node::MdxJsxFlowElement(_) => "mdxJsxFlowElement",
        Node::MdxFlowExpression(_) => "mdxFlowExpression",
        _ => "markdown",
    }
}
