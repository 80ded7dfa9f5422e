//! End-to-end properties of the complete-linkage engine.

use std::io::BufReader;

use clustagg::io::{parse_dissimilarities, parse_names};
use clustagg::merge::write_merge_list;
use clustagg::sorting::sorting_ranks;
use clustagg::{complete_linkage_merge_list, LinkDirn, Links, NameRegistry, Result, Strength};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The path of a fixture file under `tests/data`.
macro_rules! fixture {
    ($name:literal) => {
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/", $name)
    };
}

/// Parses the fixture names and links files and returns the parsed links
/// with the items' sorting ranks.
fn load_fixture(names_path: &str, links_path: &str) -> Result<(Links, Vec<usize>)> {
    let mut registry = NameRegistry::new();
    let names = BufReader::new(std::fs::File::open(names_path)?);
    let scores = parse_names(names, &mut registry)?;
    let links_reader = BufReader::new(std::fs::File::open(links_path)?);
    let links = parse_dissimilarities(links_reader, &mut registry, LinkDirn::Strength, 3)?;
    Ok((links, sorting_ranks(&scores)))
}

/// A complete graph over `num_items` items whose dissimilarities are a
/// shuffled run of distinct values, so every clustering decision is
/// unambiguous.
fn random_complete_graph(rng: &mut StdRng, num_items: usize) -> Vec<(usize, usize, Strength)> {
    let num_edges = num_items * (num_items - 1) / 2;
    let mut values: Vec<Strength> = (1..=num_edges).map(|value| value as Strength).collect();
    values.shuffle(rng);
    let mut edges = Vec::with_capacity(num_edges);
    for a in 0..num_items {
        for b in (a + 1)..num_items {
            edges.push((a, b, values[edges.len()]));
        }
    }
    edges
}

/// The merge heights of naive greedy complete-linkage clustering: always
/// merge the closest active pair, where the distance between clusters is
/// the maximum over their cross links (infinity when one is missing).
fn naive_merge_heights(num_items: usize, edges: &[(usize, usize, Strength)]) -> Vec<Strength> {
    let mut dist = vec![vec![Strength::INFINITY; num_items]; num_items];
    for &(a, b, d) in edges {
        dist[a][b] = d;
        dist[b][a] = d;
    }
    let mut active: Vec<usize> = (0..num_items).collect();
    let mut heights = Vec::with_capacity(num_items - 1);

    while active.len() > 1 {
        let mut best: Option<(usize, usize, Strength)> = None;
        for (i, &x) in active.iter().enumerate() {
            for &y in &active[i + 1..] {
                let d = dist[x][y];
                if best.map_or(true, |(_, _, best_d)| d < best_d) {
                    best = Some((x, y, d));
                }
            }
        }
        let Some((x, y, d)) = best else {
            break;
        };
        heights.push(d);
        // Fold y into x with the complete-linkage (maximum) update.
        for &z in &active {
            if z != x && z != y {
                let merged = dist[x][z].max(dist[y][z]);
                dist[x][z] = merged;
                dist[z][x] = merged;
            }
        }
        active.retain(|&z| z != y);
    }
    heights
}

#[test]
fn fixture_merge_list_matches_byte_for_byte() -> Result<()> {
    let (links, ranks) =
        load_fixture(fixture!("helix_bundle.names"), fixture!("helix_bundle.links"))?;
    let merges = complete_linkage_merge_list(links, &ranks, -35.0)?;

    let mut out = Vec::new();
    write_merge_list(&mut out, &merges)?;
    let expected = std::fs::read(fixture!("helix_bundle.expected_mergelist"))?;
    assert_eq!(out, expected);
    Ok(())
}

#[test]
fn two_runs_produce_identical_merge_lists() -> Result<()> {
    let (links, ranks) =
        load_fixture(fixture!("helix_bundle.names"), fixture!("helix_bundle.links"))?;
    let first = complete_linkage_merge_list(links.clone(), &ranks, -35.0)?;
    let second = complete_linkage_merge_list(links, &ranks, -35.0)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn merge_heights_agree_with_the_naive_algorithm() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    for num_items in 3..10 {
        let edges = random_complete_graph(&mut rng, num_items);
        let links = Links::from_tuples(&edges)?;
        let ranks: Vec<usize> = (0..num_items).collect();
        let merges = complete_linkage_merge_list(links, &ranks, Strength::INFINITY)?;

        let engine_heights: Vec<Strength> = merges.iter().map(|merge| merge.dissim).collect();
        assert_eq!(engine_heights, naive_merge_heights(num_items, &edges));
    }
    Ok(())
}

#[test]
fn merge_dissims_never_decrease() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let num_items = rng.random_range(4..12);
        // A sparse random graph, duplicates allowed.
        let num_edges = rng.random_range(num_items..3 * num_items);
        let mut edges = Vec::new();
        for _ in 0..num_edges {
            let a = rng.random_range(0..num_items);
            let b = rng.random_range(0..num_items);
            if a != b {
                edges.push((a, b, rng.random_range(0..1000) as Strength));
            }
        }
        let links = Links::from_tuples(&edges)?;
        let ranks: Vec<usize> = (0..num_items).collect();
        let merges = complete_linkage_merge_list(links, &ranks, Strength::INFINITY)?;
        for pair in merges.windows(2) {
            assert!(pair[0].dissim <= pair[1].dissim);
        }
        for merge in &merges {
            assert!(merge.node_a < merge.node_b);
            assert!(merge.merge_node > merge.node_b);
        }
    }
    Ok(())
}

#[test]
fn the_cutoff_discards_only_strictly_worse_merges() -> Result<()> {
    let (links, ranks) =
        load_fixture(fixture!("helix_bundle.names"), fixture!("helix_bundle.links"))?;
    // Exactly at the loosest recorded merge: it must survive.
    let merges = complete_linkage_merge_list(links, &ranks, -88.0)?;
    assert_eq!(merges.len(), 3);
    assert_eq!(merges.last().map(|merge| merge.dissim), Some(-88.0));
    Ok(())
}
