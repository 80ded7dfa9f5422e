//! A sparse, mutable matrix of links between items.
//!
//! Each item id owns an ordered list of half-edges; adding a link appends
//! one half to each endpoint's list. The clustering engine mutates the
//! container destructively as clusters merge, moving the surviving list's
//! allocation into the new cluster's slot and freeing the vacated ones.

use std::collections::BTreeSet;
use std::io::Write;

use crate::{spanning::min_spanning_tree, Error, Item, NameRegistry, Result, Strength};

/// A half link to an item, from some other implied item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[must_use]
pub struct Link {
    /// The id of the item linked to.
    pub node: Item,
    /// The dissimilarity between the two items.
    pub dissim: Strength,
}

/// The links out of one item.
pub type LinkList = Vec<Link>;

/// All link lists, indexed by item id.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct Links {
    /// The half-edge list of each item.
    link_lists: Vec<LinkList>,
    /// Scratch used while merging, kept around so its allocation is reused
    /// between merges. One slot per id: the dissimilarity from the first
    /// merged cluster to that id, if any.
    update_dists: Vec<Option<Strength>>,
}

impl Links {
    /// Creates an empty link container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container from undirected `(a, b, dissimilarity)` tuples.
    ///
    /// # Errors
    ///
    /// `InvalidInput` on a self-link.
    pub fn from_tuples(tuples: &[(Item, Item, Strength)]) -> Result<Self> {
        let mut links = Self::new();
        for &(index_a, index_b, dissim) in tuples {
            links.add_link_symmetrically(index_a, index_b, dissim)?;
        }
        Ok(links)
    }

    /// Whether no link lists exist at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.link_lists.is_empty()
    }

    /// The number of link lists (one per id touched so far).
    #[must_use]
    pub fn len(&self) -> usize {
        self.link_lists.len()
    }

    /// The link list of the given id.
    #[must_use]
    pub fn list(&self, id: Item) -> &LinkList {
        &self.link_lists[id]
    }

    /// The link list of the given id, mutably.
    #[must_use]
    pub fn list_mut(&mut self, id: Item) -> &mut LinkList {
        &mut self.link_lists[id]
    }

    /// Grows the container so every id below `num_items` has a (possibly
    /// empty) list.
    pub fn ensure_items(&mut self, num_items: usize) {
        if self.link_lists.len() < num_items {
            self.link_lists.resize_with(num_items, LinkList::new);
        }
    }

    /// Symmetrically adds a link of the given dissimilarity between two
    /// items, growing both lists as needed.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the two items are the same.
    pub fn add_link_symmetrically(
        &mut self,
        index_a: Item,
        index_b: Item,
        dissim: Strength,
    ) -> Result<()> {
        if index_a == index_b {
            return Err(Error::InvalidInput(format!(
                "cannot add a self-link on item {index_a}"
            )));
        }
        let needed = index_a.max(index_b) + 1;
        if self.link_lists.len() < needed {
            self.link_lists.resize_with(needed, LinkList::new);
        }
        self.link_lists[index_a].push(Link { node: index_b, dissim });
        self.link_lists[index_b].push(Link { node: index_a, dissim });
        Ok(())
    }

    /// Merges the clusters `a` and `b` into a new cluster labelled
    /// `new_label`, deriving the new cluster's links with `update`.
    ///
    /// `update` is called once per target present in *both* clusters' lists
    /// (for duplicated half-edges, the last-added entry of `a`'s list is
    /// the one consulted) with the target id and the two old
    /// dissimilarities; returning `None` drops the link. Targets present in
    /// only one list are discarded, which is the complete-linkage contract:
    /// a missing link stands for an infinite dissimilarity.
    ///
    /// `a`'s allocation is recycled for the new list and both old lists are
    /// freed. Every target id in either list must be below `new_label`,
    /// which holds whenever `new_label` is a fresh id larger than any
    /// issued before.
    pub fn merge<F>(&mut self, a: Item, b: Item, new_label: Item, mut update: F)
    where
        F: FnMut(Item, Strength, Strength) -> Option<Strength>,
    {
        if self.link_lists.len() < new_label + 1 {
            self.link_lists.resize_with(new_label + 1, LinkList::new);
        }

        self.update_dists.clear();
        self.update_dists.resize(new_label + 1, None);
        for link in &self.link_lists[a] {
            self.update_dists[link.node] = Some(link.dissim);
        }

        // Recycle a's allocation as the new cluster's list.
        self.link_lists.swap(a, new_label);
        self.link_lists[new_label].clear();

        // Taking b's list frees its memory once this scope ends; a's slot
        // was left holding the fresh empty list by the swap above.
        let b_links = std::mem::take(&mut self.link_lists[b]);
        for link in &b_links {
            if let Some(dist_via_a) = self.update_dists[link.node] {
                if let Some(dissim) = update(link.node, dist_via_a, link.dissim) {
                    self.link_lists[new_label].push(Link { node: link.node, dissim });
                    self.link_lists[link.node].push(Link { node: new_label, dissim });
                }
            }
        }
    }

    /// A spanning tree over the links restricted to the given subset of
    /// items, as `(u, v)` edges in the order the MST routine accepted
    /// them.
    ///
    /// Each undirected link is considered once, via the half stored on its
    /// higher-indexed endpoint.
    #[must_use]
    pub fn spanning_tree_of_subset(&self, subset: &BTreeSet<Item>) -> Vec<(Item, Item)> {
        let mut relevant = Vec::with_capacity(subset.len());
        for &index in subset {
            if index >= self.link_lists.len() {
                continue;
            }
            for link in &self.link_lists[index] {
                if link.node < index && subset.contains(&link.node) {
                    relevant.push((link.node, index, link.dissim));
                }
            }
        }
        min_spanning_tree(relevant)
    }
}

/// Writes the links in the deterministic order downstream consumers
/// expect: each undirected link once (with the lexicographically smaller
/// name first), sorted by the pair's smaller sorting rank and then its
/// larger one.
///
/// Each line is `<name_u> <name_v>\t<strength>\t100`, where the strength is
/// the negated dissimilarity.
///
/// # Errors
///
/// `UnknownId` if the registry lacks a name for a linked id; `Io` on write
/// failure.
pub fn write_ordered_links<W: Write>(
    out: &mut W,
    links: &Links,
    registry: &NameRegistry,
    sort_keys: &[usize],
) -> Result<()> {
    // (outer id, position in outer's list, larger rank, smaller rank)
    let mut print_links: Vec<(Item, usize, usize, usize)> = Vec::new();
    for outer_index in 0..links.len() {
        let outer_name = registry.name_of(outer_index)?;
        let outer_rank = sort_keys[outer_index];
        for (list_index, link) in links.list(outer_index).iter().enumerate() {
            if outer_name < registry.name_of(link.node)? {
                let inner_rank = sort_keys[link.node];
                print_links.push((
                    outer_index,
                    list_index,
                    outer_rank.max(inner_rank),
                    outer_rank.min(inner_rank),
                ));
            }
        }
    }

    print_links.sort_by_key(|&(_, _, larger, smaller)| (smaller, larger));

    for (outer_index, list_index, _, _) in print_links {
        let link = links.list(outer_index)[list_index];
        writeln!(
            out,
            "{} {}\t{}\t100",
            registry.name_of(outer_index)?,
            registry.name_of(link.node)?,
            -link.dissim
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{write_ordered_links, Links};
    use crate::{NameRegistry, Result};

    #[test]
    fn self_links_are_rejected() {
        let mut links = Links::new();
        assert!(links.add_link_symmetrically(2, 2, 1.0).is_err());
    }

    #[test]
    fn links_are_stored_symmetrically() -> Result<()> {
        let links = Links::from_tuples(&[(0, 2, 1.5), (1, 2, 0.5)])?;
        assert_eq!(links.len(), 3);
        assert_eq!(links.list(0).len(), 1);
        assert_eq!(links.list(1).len(), 1);
        assert_eq!(links.list(2).len(), 2);
        assert_eq!(links.list(0)[0].node, 2);
        assert_eq!(links.list(2)[0].node, 0);
        Ok(())
    }

    #[test]
    fn merge_keeps_only_shared_targets() -> Result<()> {
        // 0 and 1 both link to 2; only 0 links to 3.
        let mut links = Links::from_tuples(&[(0, 2, 1.0), (1, 2, 3.0), (0, 3, 2.0)])?;
        links.merge(0, 1, 4, |_, via_a, via_b| Some(via_a.max(via_b)));

        let merged: Vec<_> = links.list(4).iter().map(|link| (link.node, link.dissim)).collect();
        assert_eq!(merged, vec![(2, 3.0)]);

        // The reverse half-edge was appended to the target's list.
        assert!(links
            .list(2)
            .iter()
            .any(|link| link.node == 4 && float_cmp::approx_eq!(f32, link.dissim, 3.0)));

        // The vacated lists were freed.
        assert!(links.list(0).is_empty());
        assert!(links.list(1).is_empty());
        Ok(())
    }

    #[test]
    fn merge_consults_the_last_duplicate() -> Result<()> {
        // The pair (0, 2) appears twice; the later value wins on 0's side.
        let mut links = Links::from_tuples(&[(0, 2, 5.0), (0, 2, 1.0), (1, 2, 2.0)])?;
        links.merge(0, 1, 3, |_, via_a, via_b| Some(via_a.max(via_b)));
        let merged: Vec<_> = links.list(3).iter().map(|link| (link.node, link.dissim)).collect();
        assert_eq!(merged, vec![(2, 2.0)]);
        Ok(())
    }

    #[test]
    fn merge_can_drop_links() -> Result<()> {
        let mut links = Links::from_tuples(&[(0, 2, 1.0), (1, 2, 3.0)])?;
        links.merge(0, 1, 3, |_, _, _| None);
        assert!(links.list(3).is_empty());
        Ok(())
    }

    #[test]
    fn spanning_tree_restricts_to_the_subset() -> Result<()> {
        let links = Links::from_tuples(&[
            (0, 1, 1.0),
            (1, 2, 2.0),
            (0, 2, 3.0),
            (2, 9, 0.1), // outside the subset
        ])?;
        let subset: BTreeSet<_> = [0, 1, 2].into_iter().collect();
        assert_eq!(links.spanning_tree_of_subset(&subset), vec![(0, 1), (1, 2)]);
        Ok(())
    }

    #[test]
    fn ordered_links_sort_by_rank_pair() -> Result<()> {
        let mut registry = NameRegistry::new();
        for name in ["delta", "alpha", "charlie"] {
            registry.add(name);
        }
        // delta-alpha and alpha-charlie; ranks favour charlie.
        let links = Links::from_tuples(&[(0, 1, -50.0), (1, 2, -80.0)])?;
        let sort_keys = vec![2, 1, 0];

        let mut out = Vec::new();
        write_ordered_links(&mut out, &links, &registry, &sort_keys)?;
        let text = String::from_utf8(out).map_err(|e| crate::Error::InvalidInput(e.to_string()))?;
        assert_eq!(text, "alpha charlie\t80\t100\nalpha delta\t50\t100\n");
        Ok(())
    }
}
