//! Compound primitive matching.
//!
//! Subtrees are written out in a small DSL and looked up in the configured
//! pattern table:
//!
//! ```text
//! container { image; header; paragraph }   -> card_image_text
//! row { image, paragraph }                 -> media_object
//! ```
//!
//! Rows list their children comma-separated, containers semicolon-separated,
//! both in child order. Anything else, and any container without children,
//! is written as its kind name. A match only rewrites the kind; children stay
//! where they are so code generation can address them by position.

use acr_model::{AcrTree, Kind, NodeId, PipelineContext};
use log::debug;

/// DSL form of the subtree rooted at `id`. Unknown ids serialise to an
/// empty string.
pub fn serialize(tree: &AcrTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

fn write_node(tree: &AcrTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let separator = match node.kind {
        Kind::Row => ", ",
        Kind::Container => "; ",
        _ => "",
    };
    out.push_str(node.kind.as_str());
    if separator.is_empty() || node.contains().is_empty() {
        return;
    }

    out.push_str(" { ");
    for (index, &child) in node.contains().iter().enumerate() {
        if index > 0 {
            out.push_str(separator);
        }
        write_node(tree, child, out);
    }
    out.push_str(" }");
}

/// Rewrite every container or row in `siblings` whose serialised form is a
/// configured pattern. Returns the ids that were rewritten.
pub fn match_level(
    tree: &mut AcrTree,
    ctx: &PipelineContext<'_>,
    siblings: &[NodeId],
) -> Vec<NodeId> {
    let mut matched = Vec::new();
    for &id in siblings {
        if !tree.get(id).is_some_and(|node| node.kind.is_container_like()) {
            continue;
        }
        let serialized = serialize(tree, id);
        let Some(label) = ctx.config.compound_label(&serialized) else {
            continue;
        };
        if let Some(node) = tree.get_mut(id) {
            debug!("{id} ({serialized}) is a compound primitive: {label}");
            node.kind = Kind::Compound(label.to_owned());
            matched.push(id);
        }
    }
    matched
}

/// Match every level of the tree, deepest levels first.
pub fn match_tree(tree: &mut AcrTree, ctx: &PipelineContext<'_>) -> Vec<NodeId> {
    let mut parents: Vec<Option<NodeId>> = vec![None];
    parents.extend(tree.walk().into_iter().map(Some));

    let mut matched = Vec::new();
    for parent in parents.into_iter().rev() {
        let siblings = tree.children(parent).to_vec();
        matched.extend(match_level(tree, ctx, &siblings));
    }
    matched
}
