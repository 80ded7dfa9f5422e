//! The matrix of best achievable scores from each cell to the terminal
//! cell.

use crate::{
    path_step::gap_penalty_of_step, PathStep, Result, Score, ScoreSource, StepScores,
    WindowedMatrix, ALL_PATH_STEPS,
};

/// A windowed matrix of scores in which cell `(i, j)` holds the best score
/// achievable from `(i, j)` to the ends of the two sequences.
#[derive(Clone, Debug)]
#[must_use]
pub struct ScoreAccumulationMatrix {
    /// The banded score storage.
    scores: WindowedMatrix<Score>,
}

impl ScoreAccumulationMatrix {
    /// Creates a matrix for the given lengths and window width.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if either length is zero or the window cannot span
    /// the length difference.
    pub fn new(length_a: usize, length_b: usize, window: usize) -> Result<Self> {
        Ok(Self {
            scores: WindowedMatrix::new(length_a, length_b, window)?,
        })
    }

    /// Re-shapes the matrix for reuse, zeroing every cell.
    ///
    /// # Errors
    ///
    /// `InvalidShape` as for [`Self::new`].
    pub fn reset(&mut self, length_a: usize, length_b: usize, window: usize) -> Result<()> {
        self.scores.reset(length_a, length_b, window)
    }

    /// The number of rows.
    #[must_use]
    pub const fn length_a(&self) -> usize {
        self.scores.length_a()
    }

    /// The number of columns.
    #[must_use]
    pub const fn length_b(&self) -> usize {
        self.scores.length_b()
    }

    /// The requested window width.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.scores.window()
    }

    /// Stores the best score from `(index_a, index_b)` towards the end.
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if the cell is outside the band.
    pub fn set_score_towards_end(
        &mut self,
        index_a: usize,
        index_b: usize,
        score: Score,
    ) -> Result<()> {
        self.scores.set(index_a, index_b, score)
    }

    /// The best score from `(index_a, index_b)` towards the end.
    ///
    /// The recurrence reads two kinds of cell that carry no storage: the
    /// synthetic one-past-the-end indices (`index_a == length_a` or
    /// `index_b == length_b`), and successors that fall outside the band.
    /// Both score 0.
    #[must_use]
    pub fn score_towards_end(&self, index_a: usize, index_b: usize) -> Score {
        if index_a >= self.length_a() || index_b >= self.length_b() {
            return 0;
        }
        self.scores.get(index_a, index_b).unwrap_or(0)
    }

    /// The best score reachable by taking `step` from `(index_a, index_b)`
    /// and then following the optimum path from the resulting cell.
    #[must_use]
    pub fn score_from_point_plus_step(
        &self,
        index_a: usize,
        index_b: usize,
        step: PathStep,
    ) -> Score {
        let (next_a, next_b) = step.indices_after(index_a, index_b);
        self.score_towards_end(next_a, next_b)
    }
}

/// Assembles the candidate total for each of the three steps from
/// `(index_a, index_b)`: the score beyond the step, plus the pair score for
/// an `AlignPair`, less the step's gap penalty.
#[must_use]
pub fn step_scores_from_point<S: ScoreSource>(
    accumulated: &ScoreAccumulationMatrix,
    scorer: &S,
    gap_penalty: Score,
    index_a: usize,
    index_b: usize,
) -> StepScores {
    let mut totals = [0; 3];
    for (total, step) in totals.iter_mut().zip(ALL_PATH_STEPS) {
        let beyond_step = accumulated.score_from_point_plus_step(index_a, index_b, step);
        let step_score = match step {
            PathStep::AlignPair => scorer.score(index_a, index_b),
            PathStep::InsertIntoFirst | PathStep::InsertIntoSecond => 0,
        };
        *total = beyond_step + step_score - gap_penalty_of_step(step, gap_penalty);
    }
    StepScores {
        align_pair: totals[0],
        insert_into_first: totals[1],
        insert_into_second: totals[2],
    }
}

#[cfg(test)]
mod tests {
    use super::{step_scores_from_point, ScoreAccumulationMatrix};
    use crate::{Result, SequenceScoreSource};

    #[test]
    fn one_past_the_end_scores_zero() -> Result<()> {
        let matrix = ScoreAccumulationMatrix::new(3, 3, 3)?;
        assert_eq!(matrix.score_towards_end(3, 0), 0);
        assert_eq!(matrix.score_towards_end(0, 3), 0);
        assert_eq!(matrix.score_towards_end(3, 3), 0);
        Ok(())
    }

    #[test]
    fn out_of_band_successors_score_zero() -> Result<()> {
        let matrix = ScoreAccumulationMatrix::new(6, 6, 3)?;
        // (4, 2) is in bounds but below column 2's band.
        assert_eq!(matrix.score_towards_end(4, 2), 0);
        Ok(())
    }

    #[test]
    fn candidate_totals_combine_score_and_penalty() -> Result<()> {
        let mut matrix = ScoreAccumulationMatrix::new(2, 2, 4)?;
        matrix.set_score_towards_end(1, 1, 5)?;
        matrix.set_score_towards_end(1, 0, 2)?;
        matrix.set_score_towards_end(0, 1, 3)?;
        let scorer = SequenceScoreSource::from_strs("AB", "AC");
        let scores = step_scores_from_point(&matrix, &scorer, 1, 0, 0);
        // AlignPair: score(0, 0) = 1 plus the stored 5 at (1, 1).
        assert_eq!(scores.align_pair, 6);
        // Insertions: the stored successor score less one gap penalty.
        assert_eq!(scores.insert_into_first, 1);
        assert_eq!(scores.insert_into_second, 2);
        Ok(())
    }
}
