//! Minimum spanning trees over weighted edge lists.

use crate::{Item, Strength};

/// A union-find over the vertex ids appearing in an edge list.
struct DisjointSets {
    /// Parent pointers, indexed by dense position.
    parents: Vec<usize>,
}

impl DisjointSets {
    /// Creates `size` singleton sets.
    fn new(size: usize) -> Self {
        Self {
            parents: (0..size).collect(),
        }
    }

    /// The root of the set containing `index`, with path compression.
    fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parents[root] != root {
            root = self.parents[root];
        }
        let mut current = index;
        while self.parents[current] != root {
            let next = self.parents[current];
            self.parents[current] = root;
            current = next;
        }
        root
    }

    /// Joins the sets containing the two indices; returns false if they
    /// were already joined.
    fn union(&mut self, left: usize, right: usize) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }
        self.parents[right_root] = left_root;
        true
    }
}

/// Computes a minimum spanning forest of the given weighted edges by
/// Kruskal's algorithm and returns the accepted edges, most-similar first.
///
/// Edges tying on weight are taken in their input order, so the result is
/// a deterministic function of the edge list.
pub(crate) fn min_spanning_tree(mut edges: Vec<(Item, Item, Strength)>) -> Vec<(Item, Item)> {
    edges.sort_by(|x, y| x.2.total_cmp(&y.2));

    // Compact the vertex ids so the union-find can be a flat vector.
    let mut dense_ids: Vec<Item> = edges.iter().flat_map(|&(u, v, _)| [u, v]).collect();
    dense_ids.sort_unstable();
    dense_ids.dedup();
    let dense_of = |id: Item| -> usize {
        dense_ids.binary_search(&id).unwrap_or_else(|_| unreachable!("id came from the edge list"))
    };

    let mut sets = DisjointSets::new(dense_ids.len());
    let mut tree = Vec::with_capacity(dense_ids.len().saturating_sub(1));
    for (u, v, _) in edges {
        if sets.union(dense_of(u), dense_of(v)) {
            tree.push((u, v));
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::min_spanning_tree;

    #[test]
    fn picks_the_cheapest_edges() {
        let edges = vec![(0, 1, 1.0), (1, 2, 3.0), (0, 2, 2.0)];
        assert_eq!(min_spanning_tree(edges), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn spans_disconnected_components_separately() {
        let edges = vec![(0, 1, 1.0), (5, 7, 0.5)];
        assert_eq!(min_spanning_tree(edges), vec![(5, 7), (0, 1)]);
    }

    #[test]
    fn ties_keep_input_order() {
        let edges = vec![(2, 3, 1.0), (0, 1, 1.0), (1, 2, 1.0), (0, 3, 1.0)];
        assert_eq!(min_spanning_tree(edges), vec![(2, 3), (0, 1), (1, 2)]);
    }
}
