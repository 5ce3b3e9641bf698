//! Grid apportionment for rows.
//!
//! A row with several children splits a fixed column budget between them in
//! proportion to their relative widths (largest-remainder method). Images
//! sitting directly in a row are first wrapped in a container with the same
//! geometry so every column is an ordinary container.

mod apportion;
pub use apportion::{Overflow, apportion};

use acr_model::{AcrTree, InferenceError, InferenceResult, Kind, NodeId, PipelineContext, Primitive};
use log::debug;

/// Assign grid cells to the children of `row`.
///
/// Returns `false` without touching the tree when `row` is not a Row or has
/// fewer than two children.
///
/// # Errors
/// Returns [`InferenceError::ApportionmentOverflow`] when the children are
/// wider than the row allows, and propagates tree errors for unknown ids.
pub fn apportion_row(
    tree: &mut AcrTree,
    ctx: &mut PipelineContext<'_>,
    row: NodeId,
) -> InferenceResult<bool> {
    if tree.node(row)?.kind != Kind::Row || tree.children(Some(row)).len() < 2 {
        return Ok(false);
    }

    wrap_images(tree, ctx, row)?;
    tree.sort_horizontally(Some(row));

    let columns = tree.children(Some(row)).to_vec();
    let widths: Vec<f64> = columns
        .iter()
        .map(|&column| tree.relative_width(column))
        .collect();
    let budget = ctx.config.grid_budget;
    let cells = apportion(&widths, budget).map_err(|overflow| {
        InferenceError::ApportionmentOverflow {
            row,
            floor_sum: overflow.floor_sum,
            budget: overflow.budget,
        }
    })?;

    for (&column, cell) in columns.iter().zip(cells) {
        if let Some(node) = tree.get_mut(column) {
            node.grid_cell = Some(cell);
        }
    }
    debug!("apportioned {budget} cells across {} columns of {row}", columns.len());
    Ok(true)
}

/// Wrap every Image child of `row` in a synthetic Container of identical
/// geometry. Returns the wrappers created.
///
/// # Errors
/// Propagates tree errors for unknown ids.
pub fn wrap_images(
    tree: &mut AcrTree,
    ctx: &mut PipelineContext<'_>,
    row: NodeId,
) -> InferenceResult<Vec<NodeId>> {
    let images: Vec<NodeId> = tree
        .children(Some(row))
        .iter()
        .copied()
        .filter(|&child| tree.get(child).is_some_and(|node| node.kind == Kind::Image))
        .collect();

    let mut wrappers = Vec::with_capacity(images.len());
    for image in images {
        let vertices = tree.node(image)?.vertices.clone();
        let mut wrapper = Primitive::new(ctx.next_id(), Kind::Container, vertices);
        wrapper.synthetic = true;
        wrappers.push(tree.wrap(image, wrapper)?);
    }
    Ok(wrappers)
}
