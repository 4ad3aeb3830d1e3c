//! Removal of front matter that the parser left in the document body.
//!
//! Without a front matter construct, a leading `---` block parses as a
//! thematic break followed by ordinary content that ends in a setext heading
//! (the YAML lines underlined by the closing `---`). Everything up to and
//! including the first heading is that block.

use markdown::mdast::Node;

/// Drops leading nodes through the first heading when the tree starts with a
/// thematic break. Returns how many nodes were removed.
///
/// Trees that do not start with a thematic break, or have no heading at all,
/// are left untouched.
pub fn strip_legacy_frontmatter(children: &mut Vec<Node>) -> usize {
    if !matches!(children.first(), Some(Node::ThematicBreak(_))) {
        return 0;
    }

    let Some(heading) = children
        .iter()
        .position(|node| matches!(node, Node::Heading(_)))
    else {
        log::trace!("leading thematic break without a heading, leaving tree as-is");
        return 0;
    };

    children.drain(..=heading);
    heading + 1
}
