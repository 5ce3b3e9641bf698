mod image;
mod labels;
mod structure;
mod text;
mod widgets;

pub use image::ImageDetection;
pub use labels::{LabelMapping, PanelDetection};
pub use structure::{FooterDetection, NavigationDetection, RowDetection, shares_one_band};
pub use text::TextDetection;
pub use widgets::{WidgetDetection, fragments_in_band};

use acr_model::{AcrTree, Kind, NodeId};
use log::debug;

/// Children of `parent` whose kind is `kind`.
fn children_of_kind(tree: &AcrTree, parent: NodeId, kind: &Kind) -> Vec<NodeId> {
    tree.children(Some(parent))
        .iter()
        .copied()
        .filter(|&child| tree.get(child).is_some_and(|node| node.kind == *kind))
        .collect()
}

fn is_container_like(tree: &AcrTree, id: NodeId) -> bool {
    tree.get(id).is_some_and(|node| node.kind.is_container_like())
}

fn set_kind(tree: &mut AcrTree, id: NodeId, kind: Kind) {
    let Some(node) = tree.get_mut(id) else {
        return;
    };
    if node.kind != kind {
        debug!("{id}: {} -> {kind}", node.kind);
        node.kind = kind;
    }
}
