//! Implicit nesting.
//!
//! Siblings that share a horizontal band (their Y extents overlap, directly
//! or through a chain of other siblings) belong in one row. This module
//! finds those bands among a parent's direct children and wraps each band
//! of two or more shapes in a synthetic Row sized to the band's bounding box
//! plus the configured padding. The result is sorted top-to-bottom.
//! Marker shapes (the configured filtered kinds) annotate their parent and
//! stay direct children of it; they never join a band.
//!
//! Nesting an already nested level is a no-op: a band that covers all of
//! the parent's children is the parent itself, and bands of synthetic rows
//! are measured on their content, not their padded box.

mod bands;
pub use bands::{grouping_band, overlap_groups};

use acr_model::{AcrTree, Diagnostic, InferenceResult, Kind, NodeId, PipelineContext, Primitive};
use log::debug;

/// Nest the children of `parent` (`None` for the top level) into rows.
///
/// Returns the ids of the rows created, in creation order.
///
/// # Errors
/// Propagates [`acr_model::InferenceError`] from reparenting, which only
/// happens if the tree was already inconsistent.
pub fn nest_level(
    tree: &mut AcrTree,
    ctx: &mut PipelineContext<'_>,
    parent: Option<NodeId>,
) -> InferenceResult<Vec<NodeId>> {
    let children = tree.children(parent).to_vec();
    let mut groupable = Vec::with_capacity(children.len());
    for &child in &children {
        let node = tree.node(child)?;
        if node.is_degenerate() {
            ctx.record(Diagnostic::DegenerateGeometry { node: child });
        } else if !ctx.config.is_filtered(node.kind.as_str()) {
            groupable.push(child);
        }
    }

    let mut created = Vec::new();
    for group in overlap_groups(tree, &groupable) {
        if group.len() < 2 || is_same_set(&group, &children) {
            continue;
        }
        created.push(wrap_group(tree, ctx, parent, &group)?);
    }

    tree.sort_vertically(parent);
    Ok(created)
}

fn is_same_set(group: &[NodeId], children: &[NodeId]) -> bool {
    group.len() == children.len() && group.iter().all(|id| children.contains(id))
}

fn wrap_group(
    tree: &mut AcrTree,
    ctx: &mut PipelineContext<'_>,
    parent: Option<NodeId>,
    group: &[NodeId],
) -> InferenceResult<NodeId> {
    let bounds = group
        .iter()
        .filter_map(|&id| tree.get(id).and_then(Primitive::bounding_box))
        .reduce(|acc, bbox| acc.union(&bbox))
        .unwrap_or_default();
    let padded = bounds.expand(ctx.config.nesting_padding.max(0.0));

    let row_id = ctx.next_id();
    tree.insert(Primitive::synthetic(row_id, Kind::Row, &padded), parent)?;
    for &member in group {
        tree.attach_child(row_id, member)?;
    }
    debug!(
        "nested {} siblings into row {row_id} under {parent:?}",
        group.len()
    );
    Ok(row_id)
}
