//! Parsers for the names and links file formats.

mod dissimilarities;
mod names;

pub use dissimilarities::parse_dissimilarities;
pub use names::parse_names;
