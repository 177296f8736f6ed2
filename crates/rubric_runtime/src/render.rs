//! Text and JSON rendering of expanded trees.

use std::collections::BTreeMap;
use std::fmt::Write;

use rubric_expand::{ExpandedNode, FieldDirectives};
use rubric_foundation::{Error, ErrorKind, Origin, Result, Value};
use serde::Serialize;

// =============================================================================
// Text
// =============================================================================

/// Renders one field as an indented tree.
///
/// ```text
/// Person#login
/// + Username[0] {maxLength=20}
///       Required[0] {order=-9223372036854775808}
///       LengthMax[0] {order=1, value=10}
/// ```
#[must_use]
pub fn render_tree(field: &FieldDirectives) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", field.field());
    for node in field.nodes() {
        render_node(&mut out, node, 1);
    }
    out
}

fn render_node(out: &mut String, node: &ExpandedNode, depth: usize) {
    let marker = if node.composed { "+ " } else { "  " };
    let _ = write!(out, "{}{marker}{}[{}]", "  ".repeat(depth - 1), node.name(), node.index);
    let attributes: Vec<String> = node
        .instance
        .attributes
        .iter()
        .map(|(name, slot)| format!("{name}={}", slot.value))
        .collect();
    if !attributes.is_empty() {
        let _ = write!(out, " {{{}}}", attributes.join(", "));
    }
    out.push('\n');
    for child in &node.children {
        render_node(out, child, depth + 2);
    }
}

// =============================================================================
// JSON
// =============================================================================

#[derive(Serialize)]
struct AttributeView<'a> {
    value: &'a Value,
    origin: Origin,
}

#[derive(Serialize)]
struct NodeView<'a> {
    directive: &'a str,
    index: usize,
    composed: bool,
    attributes: BTreeMap<&'a str, AttributeView<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeView<'a>>,
}

impl<'a> NodeView<'a> {
    fn new(node: &'a ExpandedNode) -> Self {
        Self {
            directive: node.name(),
            index: node.index,
            composed: node.composed,
            attributes: node
                .instance
                .attributes
                .iter()
                .map(|(name, slot)| {
                    (
                        name,
                        AttributeView {
                            value: &slot.value,
                            origin: slot.origin,
                        },
                    )
                })
                .collect(),
            children: node.children.iter().map(NodeView::new).collect(),
        }
    }
}

#[derive(Serialize)]
struct FieldView<'a> {
    field: &'a str,
    directives: Vec<NodeView<'a>>,
}

/// Renders fields as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an internal error if serialization fails.
pub fn render_json<'a, I>(fields: I) -> Result<String>
where
    I: IntoIterator<Item = &'a FieldDirectives>,
{
    let views: Vec<FieldView<'_>> = fields
        .into_iter()
        .map(|field| FieldView {
            field: field.field(),
            directives: field.nodes().iter().map(NodeView::new).collect(),
        })
        .collect();
    serde_json::to_string_pretty(&views).map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))
}
