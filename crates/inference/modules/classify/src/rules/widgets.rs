use acr_model::{AcrTree, InferenceResult, Kind, NodeId, PipelineContext};

use super::{is_container_like, set_kind};
use crate::ClassificationRule;

/// Direct children of `parent` that are fragments (area below `threshold`
/// of the parent's area) whose centroid lies strictly between `start` and
/// `end`, measured from the parent's left edge as a fraction of its width.
///
/// Children without area (points, lines) never count as fragments.
pub fn fragments_in_band(
    tree: &AcrTree,
    parent: NodeId,
    start: f64,
    end: f64,
    threshold: f64,
) -> Vec<NodeId> {
    let Some(bounds) = tree.get(parent).and_then(|node| node.bounding_box()) else {
        return Vec::new();
    };
    let (area, width) = (bounds.area(), bounds.width());
    if area <= 0.0 || width <= 0.0 {
        return Vec::new();
    }

    tree.children(Some(parent))
        .iter()
        .copied()
        .filter(|&child| {
            let Some(node) = tree.get(child) else {
                return false;
            };
            let share = node.area() / area;
            if node.is_degenerate() || share <= 0.0 || share >= threshold {
                return false;
            }
            node.midpoint().is_some_and(|centre| {
                let offset = (centre.x - bounds.min_x) / width;
                offset > start && offset < end
            })
        })
        .collect()
}

/// Horizontal bands that identify each widget by the position of its single
/// inner fragment: a caret on the right, a centred label, a cursor on the
/// left. Later entries win when more than one matches.
const WIDGET_BANDS: [(Kind, f64, f64); 3] = [
    (Kind::Dropdown, 0.8, 1.0),
    (Kind::Button, 0.4, 0.6),
    (Kind::TextInput, 0.0, 0.2),
];

/// Containers holding exactly one small marker in a telltale position are
/// interactive widgets.
#[derive(Debug, Clone, Copy, Default)]
pub struct WidgetDetection;

impl ClassificationRule for WidgetDetection {
    fn name(&self) -> &'static str {
        "widget"
    }

    fn apply(
        &self,
        tree: &mut AcrTree,
        ctx: &mut PipelineContext<'_>,
        siblings: &[NodeId],
    ) -> InferenceResult<()> {
        let threshold = ctx.config.fragment_area_threshold;
        for &id in siblings {
            if !is_container_like(tree, id) {
                continue;
            }
            let mut widget = None;
            for (kind, start, end) in &WIDGET_BANDS {
                if fragments_in_band(tree, id, *start, *end, threshold).len() == 1 {
                    widget = Some(kind.clone());
                }
            }
            if let Some(kind) = widget {
                set_kind(tree, id, kind);
            }
        }
        Ok(())
    }
}
