//! Building a hierarchy from an ordered merge list and a set of cutoffs.

use crate::{Error, Hierarchy, Item, Merge, Result, Strength};

use super::{HierarchyLayer, HierarchyValue};

/// The bookkeeping for a cluster that roots a group within one cutoff
/// region.
#[derive(Clone, Copy, Debug)]
struct NodeInfo {
    /// The index of the cluster's group within its layer.
    locn: usize,
    /// The cutoff region the group currently belongs to.
    layer: usize,
}

/// Splits the merge list at each cutoff, returning one boundary index per
/// cutoff after the implicit start at 0.
///
/// The partition is strictly-greater: a merge whose dissimilarity exactly
/// equals a cutoff falls in the region *before* that cutoff, i.e. into the
/// tighter cluster.
///
/// The merge list and the cutoffs must both be sorted ascending.
#[must_use]
pub fn merge_cutoff_boundaries(merges: &[Merge], cutoffs: &[Strength]) -> Vec<usize> {
    let mut boundaries = Vec::with_capacity(cutoffs.len() + 1);
    boundaries.push(0);
    for &cutoff in cutoffs {
        let previous = *boundaries.last().unwrap_or(&0);
        let within = merges[previous..].partition_point(|merge| !(cutoff < merge.dissim));
        boundaries.push(previous + within);
    }
    boundaries
}

/// Makes the cluster hierarchy drawn at the given cutoffs from an ordered
/// merge list over `num_items` items.
///
/// The merge list must satisfy the invariants the clustering engine
/// guarantees: leaf ids below `num_items`, every merge id at least
/// `num_items` and greater than both its children, and dissimilarities
/// sorted ascending. The cutoffs must be sorted ascending. Items that
/// never merge appear as their own singleton clusters in the root layer.
///
/// The result is unsorted; use [`clusters_from_merges_and_sort`] for the
/// stable leaf ordering the output formats require.
///
/// # Errors
///
/// `Unreachable` if the merge list violates the engine's invariants.
pub fn clusters_from_merges(
    merges: &[Merge],
    num_items: usize,
    cutoffs: &[Strength],
) -> Result<Hierarchy> {
    let id_space = num_items + num_items.max(merges.len());
    let mut root_parent_of_node: Vec<Option<Item>> = vec![None; id_space];
    let mut info_of_cutoff_root: Vec<Option<NodeInfo>> = vec![None; id_space];
    let mut new_clust_indices: Vec<Item> = Vec::new();
    let mut unused_prev_clust_indices: Vec<Item> = Vec::new();
    let mut region_layers: Vec<HierarchyLayer> = Vec::with_capacity(cutoffs.len());

    let boundaries = merge_cutoff_boundaries(merges, cutoffs);

    for region in 0..cutoffs.len() {
        let region_merges = &merges[boundaries[region]..boundaries[region + 1]];

        // Best-to-worst: point each child at its parent.
        for merge in region_merges {
            root_parent_of_node[merge.node_a] = Some(merge.merge_node);
            root_parent_of_node[merge.node_b] = Some(merge.merge_node);
        }

        // Worst-to-best: a merge whose new node has no parent roots a
        // group within this region; every other merge propagates its root
        // down to its children, so that afterwards every node in the
        // region points at its region root.
        for merge in region_merges.iter().rev() {
            if let Some(root) = root_parent_of_node[merge.merge_node] {
                root_parent_of_node[merge.node_a] = Some(root);
                root_parent_of_node[merge.node_b] = Some(root);
            } else {
                info_of_cutoff_root[merge.merge_node] = Some(NodeInfo {
                    locn: new_clust_indices.len(),
                    layer: region,
                });
                new_clust_indices.push(merge.merge_node);
            }
        }

        // Best-to-worst: attach each merge's leaf children, and the roots
        // of the previous region, to their region root's group.
        let mut layer: HierarchyLayer = vec![Vec::new(); new_clust_indices.len()];
        for merge in region_merges {
            let root = root_parent_of_node[merge.node_a].ok_or_else(|| {
                Error::Unreachable(format!("node {} has no region root", merge.node_a))
            })?;
            let group_index = info_of_cutoff_root[root]
                .ok_or_else(|| Error::Unreachable(format!("region root {root} has no group")))?
                .locn;
            for child in [merge.node_a, merge.node_b] {
                if child < num_items {
                    layer[group_index].push(HierarchyValue::Entry(child));
                } else if let Some(child_info) = info_of_cutoff_root[child] {
                    if child_info.layer + 1 == region {
                        layer[group_index].push(HierarchyValue::Cluster(child_info.locn));
                    }
                }
            }
        }

        // Wipe the info of the previous-region roots consumed here.
        for merge in region_merges {
            for child in [merge.node_a, merge.node_b] {
                if info_of_cutoff_root[child].is_some() {
                    info_of_cutoff_root[child] = None;
                }
            }
        }

        // Previous-region clusters that were not merged here pass through
        // as their own singleton groups.
        unused_prev_clust_indices.retain(|&node| info_of_cutoff_root[node].is_some());
        for &previous in &unused_prev_clust_indices {
            let info = info_of_cutoff_root[previous]
                .as_mut()
                .unwrap_or_else(|| unreachable!("retained on info presence"));
            let previous_locn = info.locn;
            info.layer = region;
            info.locn = layer.len();
            layer.push(vec![HierarchyValue::Cluster(previous_locn)]);
        }

        unused_prev_clust_indices.append(&mut new_clust_indices);
        region_layers.push(layer);
    }

    // The root layer: one group holding every top-level cluster plus the
    // items that never merged.
    let mut root_group: Vec<HierarchyValue> = region_layers
        .last()
        .map_or_else(Vec::new, |last| (0..last.len()).map(HierarchyValue::Cluster).collect());
    root_group.extend(
        (0..num_items).filter(|&item| root_parent_of_node[item].is_none()).map(HierarchyValue::Entry),
    );

    let mut layers = Vec::with_capacity(region_layers.len() + 1);
    layers.push(vec![root_group]);
    layers.extend(region_layers.into_iter().rev());
    Ok(Hierarchy::new(layers))
}

/// Makes the hierarchy and sorts it by the items' sorting ranks, giving
/// the stable group and leaf ordering the output formats rely on.
///
/// `ranks` holds one rank per item, so its length is the item count.
///
/// # Errors
///
/// `Unreachable` if the merge list violates the engine's invariants.
pub fn clusters_from_merges_and_sort(
    merges: &[Merge],
    ranks: &[usize],
    cutoffs: &[Strength],
) -> Result<Hierarchy> {
    let mut hierarchy = clusters_from_merges(merges, ranks.len(), cutoffs)?;
    hierarchy.sort_by_ranks(ranks);
    Ok(hierarchy)
}

#[cfg(test)]
mod tests {
    use super::{clusters_from_merges_and_sort, merge_cutoff_boundaries};
    use crate::{Merge, Result};

    #[test]
    fn boundaries_use_a_strictly_greater_partition() {
        let merges = vec![
            Merge::new(0, 1, 5, 1.0),
            Merge::new(2, 3, 6, 2.0),
            Merge::new(4, 6, 7, 2.0),
            Merge::new(5, 7, 8, 4.0),
        ];
        // A merge equal to a cutoff lands in the region before it.
        assert_eq!(merge_cutoff_boundaries(&merges, &[2.0, 4.0]), vec![0, 3, 4]);
        assert_eq!(merge_cutoff_boundaries(&merges, &[0.5, 3.0]), vec![0, 0, 3]);
    }

    #[test]
    fn one_cutoff_splits_into_flat_clusters() -> Result<()> {
        let merges = vec![Merge::new(0, 1, 4, 1.0), Merge::new(2, 3, 5, 1.0)];
        let hierarchy = clusters_from_merges_and_sort(&merges, &[0, 1, 2, 3], &[2.0])?;
        assert_eq!(
            hierarchy.cluster_assignments(),
            vec![(0, vec![1]), (1, vec![1]), (2, vec![2]), (3, vec![2])]
        );
        Ok(())
    }

    #[test]
    fn deeper_layers_refine_shallower_ones() -> Result<()> {
        // 0 and 1 merge tightly; 2 joins them at the looser level; 3 never
        // merges.
        let merges = vec![Merge::new(0, 1, 4, 1.0), Merge::new(2, 4, 5, 5.0)];
        let hierarchy = clusters_from_merges_and_sort(&merges, &[0, 1, 2, 3], &[2.0, 6.0])?;
        assert_eq!(
            hierarchy.cluster_assignments(),
            vec![
                (0, vec![1, 1]),
                (1, vec![1, 1]),
                (2, vec![1, 2]),
                (3, vec![2, 3]),
            ]
        );
        Ok(())
    }

    #[test]
    fn unmerged_clusters_propagate_through_later_regions() -> Result<()> {
        // 0 and 1 merge in the tight region and nothing joins them later;
        // 2 and 3 merge only in the loose region, so they stay separate
        // singleton clusters at the tight level.
        let merges = vec![Merge::new(0, 1, 4, 1.0), Merge::new(2, 3, 5, 5.0)];
        let hierarchy = clusters_from_merges_and_sort(&merges, &[0, 1, 2, 3], &[2.0, 6.0])?;
        assert_eq!(
            hierarchy.cluster_assignments(),
            vec![
                (0, vec![1, 1]),
                (1, vec![1, 1]),
                (2, vec![2, 2]),
                (3, vec![2, 3]),
            ]
        );
        Ok(())
    }

    #[test]
    fn singletons_become_their_own_groups() -> Result<()> {
        let hierarchy = clusters_from_merges_and_sort(&[], &[0, 1], &[1.0])?;
        assert_eq!(hierarchy.cluster_assignments(), vec![(0, vec![1]), (1, vec![2])]);
        Ok(())
    }
}
