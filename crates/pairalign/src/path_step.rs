//! The three moves an alignment path can take, and per-move score records.

use crate::Score;

/// One step of an alignment path through the dynamic-programming matrix.
///
/// Steps are oriented *towards the ends* of the two sequences: taking a step
/// advances one or both indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[must_use]
pub enum PathStep {
    /// Align the current pair of positions and advance both indices.
    #[default]
    AlignPair,
    /// Consume a position of the first sequence against a gap in the second.
    InsertIntoFirst,
    /// Consume a position of the second sequence against a gap in the first.
    InsertIntoSecond,
}

/// All path steps, in canonical iteration order.
pub const ALL_PATH_STEPS: [PathStep; 3] = [
    PathStep::AlignPair,
    PathStep::InsertIntoFirst,
    PathStep::InsertIntoSecond,
];

impl PathStep {
    /// The index pair reached by taking this step from `(index_a, index_b)`.
    #[must_use]
    pub const fn indices_after(self, index_a: usize, index_b: usize) -> (usize, usize) {
        match self {
            Self::AlignPair => (index_a + 1, index_b + 1),
            Self::InsertIntoFirst => (index_a + 1, index_b),
            Self::InsertIntoSecond => (index_a, index_b + 1),
        }
    }
}

/// The gap penalty a step incurs.
///
/// In line with the original SSAP code, the penalty is charged for every
/// `InsertInto*` step, whether it opens a gap or extends one.
#[must_use]
pub const fn gap_penalty_of_step(step: PathStep, gap_penalty: Score) -> Score {
    match step {
        PathStep::AlignPair => 0,
        PathStep::InsertIntoFirst | PathStep::InsertIntoSecond => gap_penalty,
    }
}

/// The candidate total score for each of the three path steps from a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct StepScores {
    /// The total score achievable by taking [`PathStep::AlignPair`].
    pub align_pair: Score,
    /// The total score achievable by taking [`PathStep::InsertIntoFirst`].
    pub insert_into_first: Score,
    /// The total score achievable by taking [`PathStep::InsertIntoSecond`].
    pub insert_into_second: Score,
}

impl StepScores {
    /// The score recorded for the given step.
    #[must_use]
    pub const fn get(&self, step: PathStep) -> Score {
        match step {
            PathStep::AlignPair => self.align_pair,
            PathStep::InsertIntoFirst => self.insert_into_first,
            PathStep::InsertIntoSecond => self.insert_into_second,
        }
    }

    /// The maximum score achieved by any of the three steps.
    #[must_use]
    pub fn max_score(&self) -> Score {
        self.align_pair.max(self.insert_into_first).max(self.insert_into_second)
    }
}

#[cfg(test)]
mod tests {
    use super::{gap_penalty_of_step, PathStep, StepScores, ALL_PATH_STEPS};

    #[test]
    fn indices_after_each_step() {
        assert_eq!(PathStep::AlignPair.indices_after(3, 5), (4, 6));
        assert_eq!(PathStep::InsertIntoFirst.indices_after(3, 5), (4, 5));
        assert_eq!(PathStep::InsertIntoSecond.indices_after(3, 5), (3, 6));
    }

    #[test]
    fn gap_penalty_only_for_insertions() {
        for step in ALL_PATH_STEPS {
            let expected = if step == PathStep::AlignPair { 0 } else { 7 };
            assert_eq!(gap_penalty_of_step(step, 7), expected);
        }
    }

    // The next two cases captured a historical bug in the original code's
    // max-of-three and are kept as invariants of `StepScores::max_score`.

    #[test]
    fn max_score_with_unit_scores() {
        let scores = StepScores {
            align_pair: 1,
            insert_into_first: -1,
            insert_into_second: -1,
        };
        assert_eq!(scores.max_score(), 1);
    }

    #[test]
    fn max_score_with_realistic_scores() {
        let scores = StepScores {
            align_pair: 0,
            insert_into_first: 1564,
            insert_into_second: -50,
        };
        assert_eq!(scores.max_score(), 1564);
    }
}
