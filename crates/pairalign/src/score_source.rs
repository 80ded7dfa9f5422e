//! The abstract source of pair scores consumed by the aligner.

use crate::{Error, Result, Score};

/// A source of scores for aligning position `index_a` of one sequence with
/// position `index_b` of another.
///
/// This is the seam through which external scoring schemes (sequence
/// identity, residue-view scores, arbitrary matrices) are injected; the
/// aligner queries nothing else about the sequences.
pub trait ScoreSource {
    /// The length of the first sequence.
    fn length_a(&self) -> usize;

    /// The length of the second sequence.
    fn length_b(&self) -> usize;

    /// The score for aligning `index_a` with `index_b` (both 0-based).
    fn score(&self, index_a: usize, index_b: usize) -> Score;
}

/// Identity scoring over two byte sequences: a matching pair scores 1,
/// anything else 0.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct SequenceScoreSource<'a> {
    /// The first sequence.
    sequence_a: &'a [u8],
    /// The second sequence.
    sequence_b: &'a [u8],
}

impl<'a> SequenceScoreSource<'a> {
    /// Creates a source over two byte sequences.
    pub const fn new(sequence_a: &'a [u8], sequence_b: &'a [u8]) -> Self {
        Self { sequence_a, sequence_b }
    }

    /// Creates a source over the bytes of two strings.
    pub const fn from_strs(string_a: &'a str, string_b: &'a str) -> Self {
        Self::new(string_a.as_bytes(), string_b.as_bytes())
    }
}

impl ScoreSource for SequenceScoreSource<'_> {
    fn length_a(&self) -> usize {
        self.sequence_a.len()
    }

    fn length_b(&self) -> usize {
        self.sequence_b.len()
    }

    fn score(&self, index_a: usize, index_b: usize) -> Score {
        Score::from(self.sequence_a[index_a] == self.sequence_b[index_b])
    }
}

/// Scoring from an explicit matrix, one row per position of the first
/// sequence.
#[derive(Clone, Debug)]
#[must_use]
pub struct MatrixScoreSource {
    /// The score rows; all the same length.
    scores: Vec<Vec<Score>>,
}

impl MatrixScoreSource {
    /// Creates a source from a rectangular, non-empty matrix of scores.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the matrix is empty or ragged.
    pub fn new(scores: Vec<Vec<Score>>) -> Result<Self> {
        let Some(first_row) = scores.first() else {
            return Err(Error::InvalidShape("score matrix must have at least one row".to_string()));
        };
        if first_row.is_empty() {
            return Err(Error::InvalidShape(
                "score matrix must have at least one column".to_string(),
            ));
        }
        let width = first_row.len();
        if scores.iter().any(|row| row.len() != width) {
            return Err(Error::InvalidShape(
                "score matrix rows must all have the same length".to_string(),
            ));
        }
        Ok(Self { scores })
    }
}

impl ScoreSource for MatrixScoreSource {
    fn length_a(&self) -> usize {
        self.scores.len()
    }

    fn length_b(&self) -> usize {
        self.scores[0].len()
    }

    fn score(&self, index_a: usize, index_b: usize) -> Score {
        self.scores[index_a][index_b]
    }
}

#[cfg(test)]
mod tests {
    use super::{MatrixScoreSource, ScoreSource, SequenceScoreSource};

    #[test]
    fn identity_scores() {
        let source = SequenceScoreSource::from_strs("ABC", "AXC");
        assert_eq!((source.length_a(), source.length_b()), (3, 3));
        assert_eq!(source.score(0, 0), 1);
        assert_eq!(source.score(1, 1), 0);
        assert_eq!(source.score(2, 2), 1);
    }

    #[test]
    fn matrix_source_validates_shape() {
        assert!(MatrixScoreSource::new(vec![]).is_err());
        assert!(MatrixScoreSource::new(vec![vec![]]).is_err());
        assert!(MatrixScoreSource::new(vec![vec![1, 2], vec![3]]).is_err());
        let source = MatrixScoreSource::new(vec![vec![1, 2], vec![3, 4]]);
        assert!(source.is_ok());
    }
}
