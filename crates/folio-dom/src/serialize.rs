//! HTML serialization.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Walks a tree depth-first, pre-order, and appends each node's markup to a
//! single buffer. Output order mirrors child insertion order at every level;
//! nothing is reordered, deduplicated, or pretty-printed.
//!
//! Rendering either produces the complete string or fails: the buffer is only
//! handed back once the whole subtree has been written.

use std::str::FromStr;

use strum_macros::EnumString;

use crate::{DomError, DomTree, NodeId, NodeType};

/// Literal emitted for a doctype node.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// How deep composites may expand into further composites before rendering
/// gives up.
const MAX_EXPANSION_DEPTH: usize = 32;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements."
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VoidElement {
    /// `<area>`
    Area,
    /// `<base>`
    Base,
    /// `<br>`
    Br,
    /// `<col>`
    Col,
    /// `<embed>`
    Embed,
    /// `<hr>`
    Hr,
    /// `<img>`
    Img,
    /// `<input>`
    Input,
    /// `<link>`
    Link,
    /// `<meta>`
    Meta,
    /// `<source>`
    Source,
    /// `<track>`
    Track,
    /// `<wbr>`
    Wbr,
}

/// Check if an element is a void element (no closing tag, no children).
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VoidElement::from_str(name).is_ok()
}

/// Render the subtree rooted at `id` to HTML.
///
/// Elements are walked with an explicit stack, so nesting depth is bounded
/// only by memory. Composite expansion recurses once per nested composite.
///
/// # Errors
///
/// Returns [`DomError::Serialization`] if `id` (or any child reference) does
/// not exist, if a composite fails to expand, or if composites nest deeper
/// than the expansion limit.
pub fn to_html(tree: &DomTree, id: NodeId) -> Result<String, DomError> {
    let mut out = String::new();
    write_tree(tree, id, &mut out, 0)?;
    Ok(out)
}

/// Pending work for the serializer.
enum Step<'a> {
    /// Write a node and schedule its children.
    Visit(NodeId),
    /// Write the end tag of an element whose children are done.
    Close(&'a str),
}

fn write_tree(tree: &DomTree, root: NodeId, out: &mut String, depth: usize) -> Result<(), DomError> {
    let mut stack = vec![Step::Visit(root)];

    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Visit(id) => id,
            Step::Close(name) => {
                out.push_str("</");
                out.push_str(name);
                out.push('>');
                continue;
            }
        };
        let node = tree
            .get(id)
            .ok_or_else(|| DomError::Serialization(format!("no node with id {}", id.0)))?;

        match &node.node_type {
            NodeType::Fragment => schedule_children(&mut stack, &node.children),
            NodeType::Doctype => out.push_str(DOCTYPE),
            NodeType::Text(text) => push_escaped(out, text, Escape::Text),
            NodeType::Raw(markup) => out.push_str(markup),
            NodeType::Element(data) => {
                out.push('<');
                out.push_str(&data.tag_name);
                for (name, value) in data.attrs.entries() {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    push_escaped(out, value, Escape::Attribute);
                    out.push('"');
                }
                out.push('>');

                if !is_void_element(&data.tag_name) {
                    stack.push(Step::Close(&data.tag_name));
                    schedule_children(&mut stack, &node.children);
                }
            }
            NodeType::Composite(composite) => {
                if depth >= MAX_EXPANSION_DEPTH {
                    return Err(DomError::Serialization(format!(
                        "composite expansion deeper than {MAX_EXPANSION_DEPTH} levels"
                    )));
                }
                let mut scratch = DomTree::new();
                composite
                    .expand(&mut scratch, NodeId::ROOT)
                    .map_err(|e| DomError::Serialization(format!("composite failed to expand: {e}")))?;
                write_tree(&scratch, NodeId::ROOT, out, depth + 1)?;
            }
        }
    }
    Ok(())
}

/// Push children so the first child is popped first.
fn schedule_children(stack: &mut Vec<Step<'_>>, children: &[NodeId]) {
    stack.extend(children.iter().rev().map(|&child| Step::Visit(child)));
}

#[derive(Clone, Copy)]
enum Escape {
    /// `&` `<` `>`
    Text,
    /// `&` `<` `>` `"`
    Attribute,
}

fn push_escaped(out: &mut String, s: &str, mode: Escape) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if matches!(mode, Escape::Attribute) => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
