//! Arena holding every primitive of one ACR tree.
//!
//! Children are owned by id through each node's ordered `contains` list;
//! parent links are plain ids used for lookup only. All structural mutation
//! goes through this type so the tree invariants hold after every call:
//! - no node is its own ancestor,
//! - `level(child) == level(parent) + 1` (top-level nodes are level 0),
//! - every node appears in exactly one `contains` list or in the root list.

use acr_geometry::{BoundingBox, translate};
use core::iter;
use log::trace;
use std::collections::HashMap;

use crate::InferenceResult;
use crate::error::InferenceError;
use crate::id::NodeId;
use crate::primitive::Primitive;

#[derive(Debug, Clone, Default)]
pub struct AcrTree {
    nodes: HashMap<NodeId, Primitive>,
    roots: Vec<NodeId>,
}

impl AcrTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_id(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Primitive> {
        self.nodes.get(&id)
    }

    /// Mutable access to a primitive's own data. Structure (parent, level,
    /// children) stays private to the tree.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Primitive> {
        self.nodes.get_mut(&id)
    }

    /// Like [`Self::get`], but an unknown id is an error.
    ///
    /// # Errors
    /// Returns [`InferenceError::UnknownNode`] if `id` is not in the tree.
    pub fn node(&self, id: NodeId) -> InferenceResult<&Primitive> {
        self.nodes.get(&id).ok_or(InferenceError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> InferenceResult<&mut Primitive> {
        self.nodes
            .get_mut(&id)
            .ok_or(InferenceError::UnknownNode(id))
    }

    /// Top-level primitives (children of the implicit root), in order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Ordered children of `parent`; `None` addresses the implicit root.
    pub fn children(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            None => &self.roots,
            Some(id) => self.nodes.get(&id).map_or(&[], |node| node.contains()),
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(Primitive::parent)
    }

    pub fn max_id(&self) -> Option<NodeId> {
        self.nodes.keys().copied().max()
    }

    /// Add a detached primitive and attach it under `parent` (or at top level).
    ///
    /// # Errors
    /// Fails with [`InferenceError::DuplicateId`] if the id is taken, or
    /// [`InferenceError::UnknownNode`] if `parent` does not exist.
    pub fn insert(
        &mut self,
        mut primitive: Primitive,
        parent: Option<NodeId>,
    ) -> InferenceResult<NodeId> {
        let id = primitive.id;
        if self.nodes.contains_key(&id) {
            return Err(InferenceError::DuplicateId(id));
        }
        if let Some(missing) = parent.filter(|parent_id| !self.nodes.contains_key(parent_id)) {
            return Err(InferenceError::UnknownNode(missing));
        }

        primitive.parent = None;
        primitive.contains.clear();
        self.nodes.insert(id, primitive);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Move `child` (with its subtree) to the end of `parent`'s children.
    ///
    /// The move is rejected before anything changes when `child` is `parent`
    /// itself or one of its ancestors.
    ///
    /// # Errors
    /// Returns [`InferenceError::TreeIntegrity`] for cyclic moves and
    /// [`InferenceError::UnknownNode`] for unknown ids.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) -> InferenceResult<()> {
        if !self.nodes.contains_key(&parent) {
            return Err(InferenceError::UnknownNode(parent));
        }
        if !self.nodes.contains_key(&child) {
            return Err(InferenceError::UnknownNode(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(InferenceError::TreeIntegrity { parent, child });
        }

        self.detach(child);
        let parent_level = self.node(parent)?.level;
        self.node_mut(parent)?.contains.push(child);
        self.node_mut(child)?.parent = Some(parent);
        self.relevel(child, parent_level + 1);
        trace!("attached {child} under {parent}");
        Ok(())
    }

    /// Move `child` (with its subtree) to the end of the top-level list.
    ///
    /// # Errors
    /// Returns [`InferenceError::UnknownNode`] if `child` does not exist.
    pub fn attach_root(&mut self, child: NodeId) -> InferenceResult<()> {
        self.node(child)?;
        self.detach(child);
        self.roots.push(child);
        self.relevel(child, 0);
        Ok(())
    }

    /// [`Self::attach_child`] or [`Self::attach_root`] depending on `parent`.
    ///
    /// # Errors
    /// See [`Self::attach_child`].
    pub fn attach(&mut self, parent: Option<NodeId>, child: NodeId) -> InferenceResult<()> {
        match parent {
            Some(parent_id) => self.attach_child(parent_id, child),
            None => self.attach_root(child),
        }
    }

    /// Unlink `id` from its parent (or the root list). The node stays in the
    /// arena, parentless and unlisted, until it is attached again.
    fn detach(&mut self, id: NodeId) {
        let parent = self.parent(id);
        let siblings = match parent {
            Some(parent_id) => match self.nodes.get_mut(&parent_id) {
                Some(node) => &mut node.contains,
                None => return,
            },
            None => &mut self.roots,
        };
        siblings.retain(|&sibling| sibling != id);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
    }

    /// Place `wrapper` where `target` currently sits and move `target` into it.
    ///
    /// # Errors
    /// Fails if `target` is unknown or the wrapper id is already taken.
    pub fn wrap(&mut self, target: NodeId, mut wrapper: Primitive) -> InferenceResult<NodeId> {
        let wrapper_id = wrapper.id;
        if self.nodes.contains_key(&wrapper_id) {
            return Err(InferenceError::DuplicateId(wrapper_id));
        }
        let target_node = self.node(target)?;
        let parent = target_node.parent;
        let level = target_node.level;

        wrapper.parent = parent;
        wrapper.level = level;
        wrapper.contains.clear();
        self.nodes.insert(wrapper_id, wrapper);

        let siblings = match parent {
            Some(parent_id) => &mut self.node_mut(parent_id)?.contains,
            None => &mut self.roots,
        };
        if let Some(slot) = siblings.iter_mut().find(|slot| **slot == target) {
            *slot = wrapper_id;
        }
        if let Some(node) = self.nodes.get_mut(&target) {
            node.parent = None;
        }
        self.attach_child(wrapper_id, target)?;
        Ok(wrapper_id)
    }

    /// Replace the order of `parent`'s children. `order` must be a
    /// permutation of the current children; anything else is ignored.
    pub fn reorder_children(&mut self, parent: Option<NodeId>, order: Vec<NodeId>) {
        let current = self.children(parent);
        let same_members = current.len() == order.len()
            && order.iter().all(|id| current.contains(id));
        if !same_members {
            return;
        }
        match parent {
            None => self.roots = order,
            Some(parent_id) => {
                if let Some(node) = self.nodes.get_mut(&parent_id) {
                    node.contains = order;
                }
            }
        }
    }

    /// Sort `parent`'s children top-to-bottom by their top edge (stable).
    pub fn sort_vertically(&mut self, parent: Option<NodeId>) {
        let order = self.sorted_children(parent, Primitive::top_y);
        self.reorder_children(parent, order);
    }

    /// Sort `parent`'s children left-to-right by their top-left X (stable).
    pub fn sort_horizontally(&mut self, parent: Option<NodeId>) {
        let order = self.sorted_children(parent, Primitive::left_x);
        self.reorder_children(parent, order);
    }

    fn sorted_children(
        &self,
        parent: Option<NodeId>,
        key: impl Fn(&Primitive) -> f64,
    ) -> Vec<NodeId> {
        let mut keyed: Vec<(f64, NodeId)> = self
            .children(parent)
            .iter()
            .filter_map(|&id| self.nodes.get(&id).map(|node| (key(node), id)))
            .collect();
        keyed.sort_by(|lhs, rhs| lhs.0.total_cmp(&rhs.0));
        keyed.into_iter().map(|(_, id)| id).collect()
    }

    /// Detach `id` and drop it together with all its descendants.
    ///
    /// # Errors
    /// Returns [`InferenceError::UnknownNode`] if `id` does not exist.
    pub fn remove_subtree(&mut self, id: NodeId) -> InferenceResult<Vec<Primitive>> {
        self.node(id)?;
        let doomed = self.descendants(id);
        self.detach(id);
        let mut removed = Vec::with_capacity(doomed.len() + 1);
        for node_id in iter::once(id).chain(doomed) {
            if let Some(node) = self.nodes.remove(&node_id) {
                removed.push(node);
            }
        }
        Ok(removed)
    }

    /// Parent chain of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.parent(id);
        while let Some(ancestor) = cursor {
            if chain.contains(&ancestor) || chain.len() > self.nodes.len() {
                break;
            }
            chain.push(ancestor);
            cursor = self.parent(ancestor);
        }
        chain
    }

    /// True when `candidate` appears on `id`'s parent chain.
    pub fn is_ancestor(&self, candidate: NodeId, id: NodeId) -> bool {
        self.ancestors(id).contains(&candidate)
    }

    /// All descendants of `id` in pre-order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(Some(id)).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(Some(next)).iter().rev().copied());
        }
        out
    }

    /// Every primitive reachable from the top level, in pre-order.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            out.push(root);
            out.extend(self.descendants(root));
        }
        out
    }

    /// Depth recomputed from parent links; must always equal the stored level.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    pub fn level(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(&id).map(Primitive::level)
    }

    fn relevel(&mut self, id: NodeId, level: usize) {
        let mut stack = vec![(id, level)];
        while let Some((node_id, node_level)) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(&node_id) {
                node.level = node_level;
                stack.extend(node.contains.iter().map(|&child| (child, node_level + 1)));
            }
        }
    }

    /// Translate `id` and its whole subtree by `(dx, dy)`.
    ///
    /// # Errors
    /// Returns [`InferenceError::UnknownNode`] if `id` does not exist.
    pub fn displace(&mut self, id: NodeId, dx: f64, dy: f64) -> InferenceResult<()> {
        self.node(id)?;
        for node_id in iter::once(id).chain(self.descendants(id)) {
            if let Some(node) = self.nodes.get_mut(&node_id) {
                translate(&mut node.vertices, dx, dy);
            }
        }
        Ok(())
    }

    /// Resize `id` keeping its top-left corner fixed, then shift each direct
    /// child by the size change scaled by the child's relative size so the
    /// children keep their proportional place.
    ///
    /// # Errors
    /// Returns [`InferenceError::UnknownNode`] if `id` does not exist.
    pub fn resize(&mut self, id: NodeId, width: f64, height: f64) -> InferenceResult<()> {
        let node = self.node(id)?;
        let Some(bbox) = node.bounding_box() else {
            return Ok(());
        };
        let width = width.max(0.0);
        let height = height.max(0.0);
        let delta_width = width - bbox.width();
        let delta_height = height - bbox.height();

        let shifts: Vec<(NodeId, f64, f64)> = node
            .contains
            .iter()
            .map(|&child| {
                (
                    child,
                    delta_width * self.relative_width(child) / 100.0,
                    delta_height * self.relative_height(child) / 100.0,
                )
            })
            .collect();

        let resized = BoundingBox {
            max_x: bbox.min_x + width,
            max_y: bbox.min_y + height,
            ..bbox
        };
        self.node_mut(id)?.vertices = resized.corners();

        for (child, dx, dy) in shifts {
            self.displace(child, dx, dy)?;
        }
        Ok(())
    }

    /// Width of `id` as a percentage of its current parent's width; 0 when
    /// there is no parent or the parent has no width.
    pub fn relative_width(&self, id: NodeId) -> f64 {
        self.relative_to_parent(id, Primitive::absolute_width)
    }

    /// Height of `id` as a percentage of its current parent's height.
    pub fn relative_height(&self, id: NodeId) -> f64 {
        self.relative_to_parent(id, Primitive::absolute_height)
    }

    fn relative_to_parent(&self, id: NodeId, extent: impl Fn(&Primitive) -> f64) -> f64 {
        let Some(node) = self.nodes.get(&id) else {
            return 0.0;
        };
        let Some(parent) = node.parent.and_then(|parent_id| self.nodes.get(&parent_id)) else {
            return 0.0;
        };
        percent_of(extent(node), extent(parent))
    }

    /// Offset of `id`'s top-left corner from its parent's top-left corner,
    /// as percentages `(left, top)` of the parent's extents.
    pub fn relative_offset(&self, id: NodeId) -> (f64, f64) {
        let Some(node) = self.nodes.get(&id) else {
            return (0.0, 0.0);
        };
        let Some(parent) = node.parent.and_then(|parent_id| self.nodes.get(&parent_id)) else {
            return (0.0, 0.0);
        };
        let (Some(own), Some(outer)) = (node.bounding_box(), parent.bounding_box()) else {
            return (0.0, 0.0);
        };
        (
            percent_of(own.min_x - outer.min_x, outer.width()),
            percent_of(own.min_y - outer.min_y, outer.height()),
        )
    }
}

fn percent_of(value: f64, whole: f64) -> f64 {
    if whole > 0.0 && whole.is_finite() {
        value / whole * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tree construction on fixed fixtures cannot fail")]
mod tests {
    use super::*;
    use crate::kind::Kind;
    use acr_geometry::Point;

    fn rect(id: u64, x: f64, y: f64, width: f64, height: f64) -> Primitive {
        let bbox = BoundingBox {
            min_x: x,
            min_y: y,
            max_x: x + width,
            max_y: y + height,
        };
        Primitive::new(NodeId::new(id), Kind::Rectangle, bbox.corners())
    }

    fn sample() -> AcrTree {
        let mut tree = AcrTree::new();
        tree.insert(rect(1, 0.0, 0.0, 100.0, 100.0), None).unwrap();
        tree.insert(rect(2, 0.0, 0.0, 50.0, 20.0), Some(NodeId::new(1)))
            .unwrap();
        tree.insert(rect(3, 10.0, 5.0, 10.0, 10.0), Some(NodeId::new(2)))
            .unwrap();
        tree
    }

    #[test]
    fn levels_follow_parents() {
        let tree = sample();
        for id in tree.walk() {
            assert_eq!(tree.level(id), Some(tree.depth(id)));
        }
        assert_eq!(tree.level(NodeId::new(3)), Some(2));
    }

    #[test]
    fn reparenting_updates_subtree_levels() {
        let mut tree = sample();
        tree.attach_root(NodeId::new(2)).unwrap();
        assert_eq!(tree.roots(), &[NodeId::new(1), NodeId::new(2)]);
        assert_eq!(tree.level(NodeId::new(3)), Some(1));
        assert!(tree.children(Some(NodeId::new(1))).is_empty());
    }

    #[test]
    fn cycles_are_rejected_without_mutation() {
        let mut tree = sample();
        let err = tree
            .attach_child(NodeId::new(3), NodeId::new(1))
            .unwrap_err();
        assert_eq!(
            err,
            InferenceError::TreeIntegrity {
                parent: NodeId::new(3),
                child: NodeId::new(1)
            }
        );
        tree.attach_child(NodeId::new(2), NodeId::new(2))
            .unwrap_err();
        assert_eq!(tree.roots(), &[NodeId::new(1)]);
        assert_eq!(tree.parent(NodeId::new(3)), Some(NodeId::new(2)));
    }

    #[test]
    fn node_is_owned_by_one_parent() {
        let mut tree = sample();
        tree.attach_child(NodeId::new(1), NodeId::new(3)).unwrap();
        assert!(tree.children(Some(NodeId::new(2))).is_empty());
        assert_eq!(
            tree.children(Some(NodeId::new(1))),
            &[NodeId::new(2), NodeId::new(3)]
        );
    }

    #[test]
    fn relative_sizes_track_current_parent() {
        let mut tree = sample();
        assert_eq!(tree.relative_width(NodeId::new(2)), 50.0);
        assert_eq!(tree.relative_width(NodeId::new(1)), 0.0);
        tree.resize(NodeId::new(1), 200.0, 100.0).unwrap();
        assert_eq!(tree.relative_width(NodeId::new(2)), 25.0);
    }

    #[test]
    fn zero_width_parent_gives_zero() {
        let mut tree = AcrTree::new();
        tree.insert(rect(1, 0.0, 0.0, 0.0, 0.0), None).unwrap();
        tree.insert(rect(2, 0.0, 0.0, 5.0, 5.0), Some(NodeId::new(1)))
            .unwrap();
        assert_eq!(tree.relative_width(NodeId::new(2)), 0.0);
        assert_eq!(tree.relative_height(NodeId::new(2)), 0.0);
    }

    #[test]
    fn displacement_moves_descendants() {
        let mut tree = sample();
        tree.displace(NodeId::new(2), 5.0, 7.0).unwrap();
        let grandchild = tree.get(NodeId::new(3)).unwrap();
        assert_eq!(grandchild.vertices[0], Point::new(15.0, 12.0));
        assert_eq!(grandchild.midpoint(), Some(Point::new(20.0, 17.0)));
        let root = tree.get(NodeId::new(1)).unwrap();
        assert_eq!(root.vertices[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn resize_shifts_children_proportionally() {
        let mut tree = sample();
        tree.resize(NodeId::new(2), 100.0, 40.0).unwrap();
        let parent = tree.get(NodeId::new(2)).unwrap();
        assert_eq!(parent.absolute_width(), 100.0);
        assert_eq!(parent.absolute_height(), 40.0);
        assert!(acr_geometry::is_axis_aligned(&parent.vertices));
        // child was 20% wide and 50% tall: shifted by (50 * 0.2, 20 * 0.5)
        let child = tree.get(NodeId::new(3)).unwrap();
        assert_eq!(child.vertices[0], Point::new(20.0, 15.0));
    }

    #[test]
    fn wrap_takes_the_target_slot() {
        let mut tree = sample();
        tree.insert(rect(4, 60.0, 0.0, 40.0, 20.0), Some(NodeId::new(1)))
            .unwrap();
        let wrapper = rect(9, 0.0, 0.0, 50.0, 20.0);
        tree.wrap(NodeId::new(2), wrapper).unwrap();
        assert_eq!(
            tree.children(Some(NodeId::new(1))),
            &[NodeId::new(9), NodeId::new(4)]
        );
        assert_eq!(tree.children(Some(NodeId::new(9))), &[NodeId::new(2)]);
        assert_eq!(tree.level(NodeId::new(3)), Some(3));
    }

    #[test]
    fn remove_subtree_drops_descendants() {
        let mut tree = sample();
        let removed = tree.remove_subtree(NodeId::new(2)).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(tree.len(), 1);
        assert!(tree.children(Some(NodeId::new(1))).is_empty());
    }

    #[test]
    fn sorting_orders_siblings() {
        let mut tree = AcrTree::new();
        tree.insert(rect(1, 0.0, 0.0, 100.0, 100.0), None).unwrap();
        tree.insert(rect(2, 50.0, 40.0, 10.0, 10.0), Some(NodeId::new(1)))
            .unwrap();
        tree.insert(rect(3, 10.0, 0.0, 10.0, 10.0), Some(NodeId::new(1)))
            .unwrap();
        tree.sort_vertically(Some(NodeId::new(1)));
        assert_eq!(
            tree.children(Some(NodeId::new(1))),
            &[NodeId::new(3), NodeId::new(2)]
        );
        tree.sort_horizontally(Some(NodeId::new(1)));
        assert_eq!(
            tree.children(Some(NodeId::new(1))),
            &[NodeId::new(3), NodeId::new(2)]
        );
        assert_eq!(tree.relative_offset(NodeId::new(2)), (50.0, 40.0));
    }
}
