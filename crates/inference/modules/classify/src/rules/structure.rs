use acr_geometry::y_extent;
use acr_model::{AcrTree, InferenceResult, Kind, NodeId, PipelineContext};

use super::{is_container_like, set_kind};
use crate::ClassificationRule;

/// Whether every pair of `ids` overlaps vertically, i.e. all of them sit in
/// one horizontal band. Shapes without vertices are ignored.
pub fn shares_one_band(tree: &AcrTree, ids: &[NodeId]) -> bool {
    let mut bands = ids
        .iter()
        .filter_map(|&id| tree.get(id).and_then(|node| y_extent(&node.vertices)));
    let Some(first) = bands.next() else {
        return false;
    };
    // Pairwise-intersecting intervals always share a common point.
    let (lowest_bottom, highest_top) = bands.fold((first.max, first.min), |(bottom, top), band| {
        (bottom.min(band.max), top.max(band.min))
    });
    highest_top <= lowest_bottom
}

/// A container whose children all share one horizontal band is a row.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowDetection;

impl ClassificationRule for RowDetection {
    fn name(&self) -> &'static str {
        "row"
    }

    fn apply(
        &self,
        tree: &mut AcrTree,
        _ctx: &mut PipelineContext<'_>,
        siblings: &[NodeId],
    ) -> InferenceResult<()> {
        for &id in siblings {
            let node = tree.node(id)?;
            if node.kind != Kind::Container || node.contains().len() < 2 {
                continue;
            }
            if shares_one_band(tree, node.contains()) {
                set_kind(tree, id, Kind::Row);
            }
        }
        Ok(())
    }
}

/// Level-1 containers and rows, the candidates for navigation and footer.
fn page_sections(tree: &AcrTree, siblings: &[NodeId]) -> Vec<NodeId> {
    siblings
        .iter()
        .copied()
        .filter(|&id| tree.level(id) == Some(1) && is_container_like(tree, id))
        .collect()
}

fn has_kind(tree: &AcrTree, siblings: &[NodeId], kind: &Kind) -> bool {
    siblings.iter().any(|&id| {
        tree.get(id)
            .is_some_and(|node| node.level() == 1 && node.kind == *kind)
    })
}

/// The topmost section of a page becomes its navigation bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationDetection;

impl ClassificationRule for NavigationDetection {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn apply(
        &self,
        tree: &mut AcrTree,
        _ctx: &mut PipelineContext<'_>,
        siblings: &[NodeId],
    ) -> InferenceResult<()> {
        if has_kind(tree, siblings, &Kind::Navigation) {
            return Ok(());
        }
        let mut topmost: Option<(NodeId, f64)> = None;
        for id in page_sections(tree, siblings) {
            let top = tree.node(id)?.top_y();
            if topmost.is_none_or(|(_, best)| top < best) {
                topmost = Some((id, top));
            }
        }
        if let Some((id, _)) = topmost {
            set_kind(tree, id, Kind::Navigation);
        }
        Ok(())
    }
}

/// The bottommost section of a page becomes its footer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FooterDetection;

impl ClassificationRule for FooterDetection {
    fn name(&self) -> &'static str {
        "footer"
    }

    fn apply(
        &self,
        tree: &mut AcrTree,
        _ctx: &mut PipelineContext<'_>,
        siblings: &[NodeId],
    ) -> InferenceResult<()> {
        if has_kind(tree, siblings, &Kind::Footer) {
            return Ok(());
        }
        let mut bottommost: Option<(NodeId, f64)> = None;
        for id in page_sections(tree, siblings) {
            let top = tree.node(id)?.top_y();
            if bottommost.is_none_or(|(_, best)| top > best) {
                bottommost = Some((id, top));
            }
        }
        if let Some((id, _)) = bottommost {
            set_kind(tree, id, Kind::Footer);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Hand-built sibling lists are consistent")]
mod tests {
    use super::*;
    use acr_geometry::BoundingBox;
    use acr_model::{InferenceConfig, Primitive};

    fn strip(id: u64, kind: Kind, top: f64, bottom: f64) -> Primitive {
        let bbox = BoundingBox {
            min_x: 0.0,
            min_y: top,
            max_x: 10.0,
            max_y: bottom,
        };
        Primitive::new(NodeId::new(id), kind, bbox.corners())
    }

    #[test]
    fn band_check_needs_a_common_overlap() {
        let mut tree = AcrTree::new();
        tree.insert(strip(1, Kind::Container, 0.0, 10.0), None).unwrap();
        tree.insert(strip(2, Kind::Container, 5.0, 15.0), None).unwrap();
        tree.insert(strip(3, Kind::Container, 12.0, 20.0), None).unwrap();
        let ids = [NodeId::new(1), NodeId::new(2), NodeId::new(3)];
        assert!(shares_one_band(&tree, &ids[..2]));
        assert!(!shares_one_band(&tree, &ids));
        assert!(!shares_one_band(&tree, &[]));
    }

    #[test]
    fn containers_with_one_band_become_rows() {
        let mut tree = AcrTree::new();
        tree.insert(strip(1, Kind::Container, 0.0, 50.0), None).unwrap();
        tree.insert(strip(2, Kind::Container, 0.0, 10.0), Some(NodeId::new(1)))
            .unwrap();
        tree.insert(strip(3, Kind::Container, 2.0, 12.0), Some(NodeId::new(1)))
            .unwrap();
        tree.insert(strip(4, Kind::Container, 0.0, 50.0), None).unwrap();
        tree.insert(strip(5, Kind::Container, 0.0, 10.0), Some(NodeId::new(4)))
            .unwrap();
        let config = InferenceConfig::default();
        let mut ctx = PipelineContext::new(&config, &tree);

        let roots = tree.roots().to_vec();
        RowDetection.apply(&mut tree, &mut ctx, &roots).unwrap();

        assert_eq!(tree.get(NodeId::new(1)).unwrap().kind, Kind::Row);
        assert_eq!(tree.get(NodeId::new(4)).unwrap().kind, Kind::Container);
    }

    #[test]
    fn navigation_is_assigned_once() {
        let mut tree = AcrTree::new();
        tree.insert(strip(1, Kind::Panel, 0.0, 100.0), None).unwrap();
        tree.insert(strip(2, Kind::Container, 40.0, 50.0), Some(NodeId::new(1)))
            .unwrap();
        tree.insert(strip(3, Kind::Container, 0.0, 10.0), Some(NodeId::new(1)))
            .unwrap();
        let config = InferenceConfig::default();
        let mut ctx = PipelineContext::new(&config, &tree);
        let siblings = tree.children(Some(NodeId::new(1))).to_vec();

        NavigationDetection
            .apply(&mut tree, &mut ctx, &siblings)
            .unwrap();
        assert_eq!(tree.get(NodeId::new(3)).unwrap().kind, Kind::Navigation);

        // A later, higher section does not steal the label.
        tree.insert(strip(4, Kind::Container, -10.0, 0.0), Some(NodeId::new(1)))
            .unwrap();
        let grown = tree.children(Some(NodeId::new(1))).to_vec();
        NavigationDetection
            .apply(&mut tree, &mut ctx, &grown)
            .unwrap();
        assert_eq!(tree.get(NodeId::new(4)).unwrap().kind, Kind::Container);
    }

    #[test]
    fn footer_skips_the_navigation_bar() {
        let mut tree = AcrTree::new();
        tree.insert(strip(1, Kind::Panel, 0.0, 100.0), None).unwrap();
        tree.insert(strip(2, Kind::Navigation, 0.0, 10.0), Some(NodeId::new(1)))
            .unwrap();
        let config = InferenceConfig::default();
        let mut ctx = PipelineContext::new(&config, &tree);
        let siblings = tree.children(Some(NodeId::new(1))).to_vec();

        FooterDetection.apply(&mut tree, &mut ctx, &siblings).unwrap();
        assert_eq!(tree.get(NodeId::new(2)).unwrap().kind, Kind::Navigation);
    }
}
