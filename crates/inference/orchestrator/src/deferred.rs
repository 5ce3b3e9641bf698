//! Whole-tree versions of the optional stages, for callers that ran the
//! pipeline with those stages switched off.

use acr_model::{AcrTree, InferenceResult, NodeId, PipelineContext};
use inference_compound::match_tree;
use inference_grid::apportion_row;
use log::debug;

use crate::pipeline::{absorb, is_row};

/// Apportion grid cells in every row of the tree. Returns the rows that
/// received cells.
///
/// # Errors
/// Under the abort policy, the first row that overflows its budget.
pub fn apportion_tree(
    tree: &mut AcrTree,
    ctx: &mut PipelineContext<'_>,
) -> InferenceResult<Vec<NodeId>> {
    let rows: Vec<NodeId> = tree
        .walk()
        .into_iter()
        .filter(|&id| is_row(tree, id))
        .collect();

    let mut apportioned = Vec::with_capacity(rows.len());
    for row in rows {
        let outcome = apportion_row(tree, ctx, row).map(|applied| {
            if applied {
                apportioned.push(row);
            }
        });
        absorb(ctx, Some(row), outcome)?;
    }
    debug!("deferred grid pass apportioned {} rows", apportioned.len());
    Ok(apportioned)
}

/// Match compound primitives over the whole tree, deepest levels first.
/// Returns the rewritten primitives.
pub fn match_compounds_tree(tree: &mut AcrTree, ctx: &PipelineContext<'_>) -> Vec<NodeId> {
    let matched = match_tree(tree, ctx);
    debug!("deferred compound pass matched {} primitives", matched.len());
    matched
}
