//! 3-D points and the single-linkage extension used by nearby-residue
//! filtering.

use serde::{Deserialize, Serialize};

/// A point in 3-D space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Coord {
    /// The x component.
    pub x: f64,
    /// The y component.
    pub y: f64,
    /// The z component.
    pub z: f64,
}

impl Coord {
    /// Creates a point from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// The squared distance between two points.
#[must_use]
pub fn squared_distance(lhs: Coord, rhs: Coord) -> f64 {
    let dx = lhs.x - rhs.x;
    let dy = lhs.y - rhs.y;
    let dz = lhs.z - rhs.z;
    dz.mul_add(dz, dy.mul_add(dy, dx * dx))
}

/// How a point participates in a single-linkage extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub enum CoordLinkage {
    /// The point can be absorbed and can absorb further points.
    AddAndLink,
    /// The point can be absorbed but never serves as a hop source.
    AddOnly,
}

/// Restricts a point set to the single-linkage extension of its core.
///
/// `points` starts with a core of `core_size` points followed by the
/// candidates. The core is repeatedly extended by any candidate within
/// `extension_distance` of a point absorbed in the previous round, where
/// only [`CoordLinkage::AddAndLink`] points radiate; points tagged
/// [`CoordLinkage::AddOnly`] are absorbed but extend nothing. Candidates
/// never reached are removed. The order of the retained points is
/// unspecified.
pub fn restrict_to_single_linkage_extension(
    points: &mut Vec<(Coord, CoordLinkage)>,
    core_size: usize,
    extension_distance: f64,
) {
    let distance_sq = extension_distance * extension_distance;
    let mut added_begin = 0;
    let mut added_end = core_size.min(points.len());

    // Keep absorbing while the previous round added something and
    // candidates remain.
    while added_begin != added_end && added_end != points.len() {
        // Partition the remaining candidates by whether they lie within
        // distance of any linkable point absorbed in the previous round,
        // moving the absorbed ones to the front of the candidate range.
        let mut absorbed_end = added_end;
        for candidate in added_end..points.len() {
            let reachable = points[added_begin..added_end].iter().any(|&(source, linkage)| {
                linkage == CoordLinkage::AddAndLink
                    && squared_distance(points[candidate].0, source) <= distance_sq
            });
            if reachable {
                points.swap(absorbed_end, candidate);
                absorbed_end += 1;
            }
        }
        added_begin = added_end;
        added_end = absorbed_end;
    }

    points.truncate(added_end);
}
