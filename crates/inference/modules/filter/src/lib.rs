//! Marker primitives (intersections, triangles, text lines, points) only
//! exist to drive inference. Before the tree reaches the editor they are
//! hidden, and before code generation they are removed.

use acr_model::{AcrTree, InferenceConfig, InferenceResult, NodeId, Primitive};
use log::debug;

fn is_marker(tree: &AcrTree, config: &InferenceConfig, id: NodeId) -> bool {
    tree.get(id)
        .is_some_and(|node| config.is_filtered(node.kind.as_str()))
}

/// Set `draw` on every primitive: false for filtered kinds, true otherwise.
/// Returns how many primitives are hidden.
pub fn mark_drawable(tree: &mut AcrTree, config: &InferenceConfig) -> usize {
    let mut hidden = 0;
    for id in tree.walk() {
        let draw = !is_marker(tree, config, id);
        if let Some(node) = tree.get_mut(id) {
            node.draw = draw;
        }
        if !draw {
            hidden += 1;
        }
    }
    hidden
}

/// Remove every filtered-kind primitive together with its subtree.
///
/// # Errors
/// Propagates tree errors; none occur on a consistent tree.
pub fn filter_primitives(
    tree: &mut AcrTree,
    config: &InferenceConfig,
) -> InferenceResult<Vec<Primitive>> {
    let doomed: Vec<NodeId> = tree
        .walk()
        .into_iter()
        .filter(|&id| is_marker(tree, config, id))
        .collect();

    let mut removed = Vec::new();
    for id in doomed {
        // Already gone with a filtered ancestor.
        if !tree.contains_id(id) {
            continue;
        }
        removed.extend(tree.remove_subtree(id)?);
    }
    debug!("filtered {} marker primitives", removed.len());
    Ok(removed)
}
