//! Whether link values measure dissimilarity or strength.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The direction of the values in a links file: a dissimilarity (smaller
/// is more similar) or a strength (larger is more similar).
///
/// The engine always works in dissimilarities; strengths are negated on
/// the way in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[must_use]
pub enum LinkDirn {
    /// The link value is a measure of dissimilarity.
    Dissimilarity,
    /// The link value is a measure of strength.
    #[default]
    Strength,
}

impl fmt::Display for LinkDirn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dissimilarity => write!(f, "dissimilarity"),
            Self::Strength => write!(f, "strength"),
        }
    }
}
