use acr_geometry::{Extent, y_extent};
use acr_model::{AcrTree, NodeId};

/// Vertical extent used to decide which band a node belongs to.
///
/// Synthetic nodes with children are measured on their content so the
/// padding added around a row never pulls neighbours into it.
pub fn grouping_band(tree: &AcrTree, id: NodeId) -> Option<Extent> {
    let node = tree.get(id)?;
    if node.synthetic && !node.contains().is_empty() {
        let content = node
            .contains()
            .iter()
            .filter_map(|&child| tree.get(child).and_then(|member| y_extent(&member.vertices)))
            .reduce(|acc, band| acc.union(&band));
        if content.is_some() {
            return content;
        }
    }
    y_extent(&node.vertices)
}

/// Partition `ids` into connected components of overlapping bands.
///
/// Components come out in order of their first member, and members keep
/// the relative order they have in `ids`. Ids without a band end up alone.
pub fn overlap_groups(tree: &AcrTree, ids: &[NodeId]) -> Vec<Vec<NodeId>> {
    let bands: Vec<Option<Extent>> = ids.iter().map(|&id| grouping_band(tree, id)).collect();
    let mut assigned = vec![false; ids.len()];
    let mut groups = Vec::new();

    for seed in 0..ids.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut members = vec![seed];
        let mut frontier = vec![seed];
        while let Some(current) = frontier.pop() {
            let Some(band) = bands[current] else {
                continue;
            };
            for candidate in 0..ids.len() {
                if assigned[candidate] {
                    continue;
                }
                if bands[candidate].is_some_and(|other| band.intersects(&other)) {
                    assigned[candidate] = true;
                    members.push(candidate);
                    frontier.push(candidate);
                }
            }
        }
        members.sort_unstable();
        groups.push(members.into_iter().map(|index| ids[index]).collect());
    }
    groups
}
