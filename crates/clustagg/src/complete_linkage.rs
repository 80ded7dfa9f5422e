//! Complete-linkage clustering by the nearest-neighbour chain.
//!
//! The classical agglomerative update recomputes all distances after every
//! merge, which is cubic. The nearest-neighbour chain instead chases
//! closest neighbours from an arbitrary start until it finds a reciprocal
//! pair, which must be a valid next merge; after merging, most of the
//! chain is still valid and is resumed rather than rebuilt.
//!
//! Under the complete-linkage rule the dissimilarity between a merged
//! cluster and any third cluster is the maximum of the two pre-merge
//! dissimilarities, so a link missing on either side stands for infinity
//! and the merged link is dropped.

use std::cmp::Ordering;

use crate::{id_pot::IdPot, Error, Item, Link, Links, Merge, Result, Strength};

/// Calculates the ordered sequence of merges produced by complete-linkage
/// clustering of the given links.
///
/// `sort_keys` holds the rank of each item (0 in the slot of the most
/// preferred item); its length is the number of items. Ties in the
/// neighbour search fall back on these ranks, which is what makes the
/// output a deterministic function of the inputs. The result is sorted by
/// ascending dissimilarity (ties keep the order the chain produced them
/// in), truncated after `max_dissim`, and normalised so each merge's
/// endpoints are in ascending order.
///
/// Clusters left with no active links are connected to the smallest other
/// active id at infinite dissimilarity; those merges survive only if
/// `max_dissim` is itself infinite.
///
/// # Errors
///
/// `Unreachable` if the engine's id bookkeeping is violated, which
/// indicates a bug rather than bad input.
pub fn complete_linkage_merge_list(
    mut links: Links,
    sort_keys: &[usize],
    max_dissim: Strength,
) -> Result<Vec<Merge>> {
    let num_items = sort_keys.len();

    let mut results: Vec<Merge> = Vec::new();
    let mut pot = IdPot::new(num_items);
    let mut num_clusters = num_items;

    if !links.is_empty() {
        // Items that were named but never linked still need a slot.
        links.ensure_items(num_items);

        let mut sorted_keys: Vec<usize> = sort_keys.to_vec();
        let mut chain: Vec<Item> = Vec::new();

        while num_clusters > 1 {
            let (mut a, mut b);
            if chain.len() < 4 {
                a = pot.nth(0);
                b = pot.nth(1);
                chain.clear();
                chain.push(a);
            } else {
                a = chain[chain.len() - 4];
                b = chain[chain.len() - 3];
                chain.truncate(chain.len() - 3);
            }

            let mut dist;
            loop {
                let a_links = links.list_mut(a);
                a_links.retain(|link| pot.contains(link.node));
                let nearest = min_link(a_links, &sorted_keys, b);

                b = a;
                match nearest {
                    Some(link) => {
                        a = link.node;
                        dist = link.dissim;
                    }
                    None => {
                        a = pot.min_excluding(a).ok_or_else(|| {
                            Error::Unreachable("no other active cluster to chain to".to_string())
                        })?;
                        dist = Strength::INFINITY;
                    }
                }
                chain.push(a);

                if chain.len() >= 3 && a == chain[chain.len() - 3] {
                    break;
                }
            }

            pot.remove(a);
            pot.remove(b);
            let new_label = pot.add_new();

            results.push(Merge::new(a, b, new_label, dist));
            num_clusters -= 1;

            if new_label != sorted_keys.len() {
                return Err(Error::Unreachable(format!(
                    "new cluster id {new_label} does not match the {} sort keys tracked",
                    sorted_keys.len()
                )));
            }
            sorted_keys.push(sorted_keys[a].min(sorted_keys[b]));

            links.merge(a, b, new_label, |target, dist_via_a, dist_via_b| {
                pot.contains(target).then(|| dist_via_a.max(dist_via_b))
            });
        }

        results.sort_by(|x, y| x.dissim.total_cmp(&y.dissim));
        let keep = results.partition_point(|merge| !(max_dissim < merge.dissim));
        results.truncate(keep);
    }

    // Store each merge's endpoints in ascending order; cheap, and it makes
    // the merge list more reproducible.
    for merge in &mut results {
        if merge.node_a > merge.node_b {
            std::mem::swap(&mut merge.node_a, &mut merge.node_b);
        }
    }

    Ok(results)
}

/// The active link to chase from a cluster: lexicographically smallest by
/// `(dissimilarity, target rank, target-is-not-the-previous-cluster)`, so
/// ties prefer better-ranked targets and, among those, the cluster the
/// chain just came from.
fn min_link(a_links: &[Link], sorted_keys: &[usize], previous: Item) -> Option<Link> {
    let key_of = |link: &Link| (sorted_keys[link.node], link.node != previous);
    let mut best: Option<&Link> = None;
    for link in a_links {
        let better = best.map_or(true, |current| match link.dissim.total_cmp(&current.dissim) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => key_of(link) < key_of(current),
        });
        if better {
            best = Some(link);
        }
    }
    best.copied()
}
