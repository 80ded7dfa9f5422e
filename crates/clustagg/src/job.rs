//! The clustering pipeline: parse the input files, compute the merge
//! list, build the hierarchy, write the requested outputs.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    complete_linkage_merge_list,
    hierarchy::{clusters_from_merges_and_sort, write_cluster, write_reps, write_spanning_trees},
    io::{parse_dissimilarities, parse_names},
    links::write_ordered_links,
    merge::write_merge_list,
    sorting::{identity_ranks, sorting_ranks},
    Error, LinkDirn, NameRegistry, Result, Strength,
};

/// What a clustering run should read and produce.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[must_use]
pub struct ClusterJobSpec {
    /// The names file, giving each item a sort score. Optional, but
    /// without it items only linked, never named, rank by insertion order
    /// and singletons cannot appear at all.
    pub names_file: Option<PathBuf>,
    /// The links file.
    pub links_file: PathBuf,
    /// Whether the links file's values are strengths or dissimilarities.
    pub link_dirn: LinkDirn,
    /// The 1-based column of the links file holding the value, counting
    /// the two id fields.
    pub column: usize,
    /// The clustering levels, in the same orientation as the links file's
    /// values.
    pub levels: Vec<Strength>,
    /// Where to write the outputs.
    pub output: ClusterOutputSpec,
}

/// The output files of a clustering run. With none requested, the cluster
/// membership is written to standard output.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[must_use]
pub struct ClusterOutputSpec {
    /// The per-item cluster membership file.
    pub clusters_file: Option<PathBuf>,
    /// The merge-list file.
    pub merges_file: Option<PathBuf>,
    /// The per-cluster spanning-tree file.
    pub spans_file: Option<PathBuf>,
    /// The per-cluster representative file.
    pub reps_file: Option<PathBuf>,
    /// The deterministically re-ordered links file.
    pub sorted_links_file: Option<PathBuf>,
}

impl ClusterOutputSpec {
    /// Whether no output file was requested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.clusters_file.is_none()
            && self.merges_file.is_none()
            && self.spans_file.is_none()
            && self.reps_file.is_none()
            && self.sorted_links_file.is_none()
    }
}

/// The levels converted to dissimilarities and sorted ascending, the
/// orientation the engine and the hierarchy builder work in.
#[must_use]
pub fn sorted_dissims(levels: &[Strength], link_dirn: LinkDirn) -> Vec<Strength> {
    let mut dissims: Vec<Strength> = match link_dirn {
        LinkDirn::Strength => levels.iter().map(|&level| -level).collect(),
        LinkDirn::Dissimilarity => levels.to_vec(),
    };
    dissims.sort_by(Strength::total_cmp);
    dissims
}

/// The loosest level as a dissimilarity: merges beyond it are discarded.
///
/// # Errors
///
/// `InvalidInput` if the level list is empty.
pub fn max_dissim(levels: &[Strength], link_dirn: LinkDirn) -> Result<Strength> {
    sorted_dissims(levels, link_dirn)
        .last()
        .copied()
        .ok_or_else(|| Error::InvalidInput("at least one clustering level is required".to_string()))
}

/// A warning when the levels are not sorted in the direction expected for
/// the link direction (ascending strengths, or descending
/// dissimilarities), or `None` when they are.
#[must_use]
pub fn dissim_sort_warning(levels: &[Strength], link_dirn: LinkDirn) -> Option<String> {
    let is_expected = match link_dirn {
        LinkDirn::Strength => levels.windows(2).all(|pair| pair[0] <= pair[1]),
        LinkDirn::Dissimilarity => levels.windows(2).all(|pair| pair[0] >= pair[1]),
    };
    if is_expected {
        return None;
    }
    let direction = match link_dirn {
        LinkDirn::Strength => "increasing",
        LinkDirn::Dissimilarity => "decreasing",
    };
    let rendered: Vec<String> = levels.iter().map(ToString::to_string).collect();
    Some(format!(
        "the levels ({}) are not sorted to be {direction} as would be expected with a {link_dirn} link direction",
        rendered.join(", ")
    ))
}

/// Runs a clustering job end to end.
///
/// # Errors
///
/// `InvalidInput` for an empty level list or malformed input lines; `Io`
/// for file failures; `Unreachable` if the engine's internal invariants
/// are violated.
pub fn run_cluster_job(spec: &ClusterJobSpec) -> Result<()> {
    let cutoffs = sorted_dissims(&spec.levels, spec.link_dirn);
    let merge_limit = max_dissim(&spec.levels, spec.link_dirn)?;
    if let Some(warning) = dissim_sort_warning(&spec.levels, spec.link_dirn) {
        ftlog::warn!("{warning}");
    }

    let mut registry = NameRegistry::new();

    // Parse the names before the links so named items take the low ids.
    let scores = match &spec.names_file {
        Some(names_file) => {
            let reader = BufReader::new(File::open(names_file)?);
            Some(parse_names(reader, &mut registry)?)
        }
        None => {
            ftlog::warn!(
                "no names file was given; singleton items cannot appear in the clustering output"
            );
            None
        }
    };

    let links_reader = BufReader::new(File::open(&spec.links_file)?);
    let links = parse_dissimilarities(links_reader, &mut registry, spec.link_dirn, spec.column)?;

    let ranks = match scores {
        Some(mut scores) => {
            if scores.len() < registry.len() {
                ftlog::warn!(
                    "{} linked items are missing from the names file; they will sort last",
                    registry.len() - scores.len()
                );
                scores.resize(registry.len(), f64::INFINITY);
            }
            sorting_ranks(&scores)
        }
        None => identity_ranks(registry.len()),
    };

    let merges = complete_linkage_merge_list(links.clone(), &ranks, merge_limit)?;

    if let Some(merges_file) = &spec.output.merges_file {
        let mut out = BufWriter::new(File::create(merges_file)?);
        write_merge_list(&mut out, &merges)?;
        out.flush()?;
    }

    // Building the hierarchy is linear in the merges, far cheaper than
    // producing them.
    let hierarchy = clusters_from_merges_and_sort(&merges, &ranks, &cutoffs)?;

    if let Some(clusters_file) = &spec.output.clusters_file {
        let mut out = BufWriter::new(File::create(clusters_file)?);
        write_cluster(&mut out, &hierarchy, &registry)?;
        out.flush()?;
    } else if spec.output.is_empty() {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_cluster(&mut out, &hierarchy, &registry)?;
    }

    if let Some(spans_file) = &spec.output.spans_file {
        let mut out = BufWriter::new(File::create(spans_file)?);
        write_spanning_trees(&mut out, &hierarchy, &registry, &links)?;
        out.flush()?;
    }

    if let Some(reps_file) = &spec.output.reps_file {
        let mut out = BufWriter::new(File::create(reps_file)?);
        write_reps(&mut out, &hierarchy, &registry)?;
        out.flush()?;
    }

    if let Some(sorted_links_file) = &spec.output.sorted_links_file {
        let mut out = BufWriter::new(File::create(sorted_links_file)?);
        write_ordered_links(&mut out, &links, &registry, &ranks)?;
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{dissim_sort_warning, max_dissim, sorted_dissims};
    use crate::{LinkDirn, Result};

    #[test]
    fn strengths_sort_into_descending_looseness() {
        // Ascending strengths become ascending dissimilarities after
        // negation and sorting: the tightest level first.
        assert_eq!(
            sorted_dissims(&[35.0, 60.0, 95.0, 100.0], LinkDirn::Strength),
            vec![-100.0, -95.0, -60.0, -35.0]
        );
        assert_eq!(
            sorted_dissims(&[4.0, 1.0, 2.0], LinkDirn::Dissimilarity),
            vec![1.0, 2.0, 4.0]
        );
    }

    #[test]
    fn the_loosest_level_is_the_merge_limit() -> Result<()> {
        assert_eq!(max_dissim(&[35.0, 100.0], LinkDirn::Strength)?, -35.0);
        assert_eq!(max_dissim(&[1.0, 4.0], LinkDirn::Dissimilarity)?, 4.0);
        assert!(max_dissim(&[], LinkDirn::Strength).is_err());
        Ok(())
    }

    #[test]
    fn unsorted_levels_warn_for_their_direction() {
        assert!(dissim_sort_warning(&[35.0, 60.0], LinkDirn::Strength).is_none());
        assert!(dissim_sort_warning(&[60.0, 35.0], LinkDirn::Strength).is_some());
        assert!(dissim_sort_warning(&[4.0, 1.0], LinkDirn::Dissimilarity).is_none());
        assert!(dissim_sort_warning(&[1.0, 4.0], LinkDirn::Dissimilarity).is_some());
    }
}
