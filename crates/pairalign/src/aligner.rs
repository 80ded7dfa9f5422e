//! The windowed dynamic-programming aligner.
//!
//! This is the standard Needleman-Wunsch algorithm (the O(n^2) refinement),
//! expressed over a *return-path* matrix populated from the bottom-right
//! corner to the top-left. For each in-band cell the three candidate moves
//! are scored:
//!
//! - `AlignPair`: the pair score at the cell plus the best score from the
//!   diagonal successor;
//! - `InsertIntoFirst` / `InsertIntoSecond`: the best score from the
//!   down/right successor, less one gap penalty.
//!
//! The cell records the best candidate's score and step; tracing the steps
//! from `(0, 0)` yields the alignment. Successors past the ends of the
//! sequences, or outside the band, contribute score 0.
//!
//! In line with the previous SSAP code, the gap penalty is charged for
//! every step in a gap run, not only for opening the gap.
//!
//! When several candidates achieve the best score the choice must be
//! symmetric, so that swapping the two inputs yields the mirror alignment.
//! The rules, in order: prefer `AlignPair`; prefer the only winning
//! insertion; prefer the insertion whose post-step row/column ratio is
//! closer to the ratio of the two lengths; then the one closer to the main
//! diagonal's ratio of 1; then `InsertIntoFirst`.

use crate::{
    return_path::make_alignment, score_accumulation::step_scores_from_point,
    windowed_matrix::window_width_for_full_matrix, Alignment, PathStep, Result,
    ReturnPathMatrix, Score, ScoreAccumulationMatrix, ScoreSource, StepScores,
};

/// A reusable windowed dynamic-programming aligner.
///
/// The aligner owns its two matrices and re-shapes them on every call, so a
/// single instance can serve many alignments without reallocating when the
/// shapes repeat.
#[derive(Clone, Debug)]
#[must_use]
pub struct DpAligner {
    /// The per-cell locally-optimal steps.
    return_path: ReturnPathMatrix,
    /// The per-cell best scores towards the end.
    accumulated: ScoreAccumulationMatrix,
}

impl DpAligner {
    /// Creates an aligner with minimal uninitialised matrices.
    ///
    /// The matrices are shaped on the first call to [`Self::align`].
    pub fn new() -> Self {
        Self {
            return_path: ReturnPathMatrix::new(1, 1, 1)
                .unwrap_or_else(|_| unreachable!("a 1 x 1 matrix with window 1 is always valid")),
            accumulated: ScoreAccumulationMatrix::new(1, 1, 1)
                .unwrap_or_else(|_| unreachable!("a 1 x 1 matrix with window 1 is always valid")),
        }
    }

    /// Aligns the two sequences of the score source, restricted to a
    /// diagonal window of the given width, and returns the total score with
    /// the alignment.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if either sequence is empty or the window cannot span
    /// the difference in lengths.
    pub fn align<S: ScoreSource>(
        &mut self,
        scorer: &S,
        gap_penalty: Score,
        window: usize,
    ) -> Result<(Score, Alignment)> {
        let length_a = scorer.length_a();
        let length_b = scorer.length_b();
        ftlog::debug!("aligning {length_a} x {length_b} with window width {window}");
        self.return_path.reset(length_a, length_b, window)?;
        self.accumulated.reset(length_a, length_b, window)?;

        for index_a in (0..length_a).rev() {
            let (b_start, b_stop) = self.return_path.b_window_start_and_stop_for_a(index_a);
            for index_b in (b_start..=b_stop).rev() {
                let step_scores =
                    step_scores_from_point(&self.accumulated, scorer, gap_penalty, index_a, index_b);
                let chosen_step =
                    choose_path_step(&step_scores, index_a, index_b, length_a, length_b);
                self.return_path.set_step_towards_end(index_a, index_b, chosen_step)?;
                self.accumulated.set_score_towards_end(
                    index_a,
                    index_b,
                    step_scores.get(chosen_step),
                )?;
            }
        }

        let alignment = make_alignment(&self.return_path)?;
        let total = self.accumulated.score_towards_end(0, 0);
        Ok((total, alignment))
    }

    /// Aligns with a window wide enough that no cell is pruned.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if either sequence is empty.
    pub fn align_full<S: ScoreSource>(
        &mut self,
        scorer: &S,
        gap_penalty: Score,
    ) -> Result<(Score, Alignment)> {
        let window = window_width_for_full_matrix(scorer.length_a(), scorer.length_b());
        self.align(scorer, gap_penalty, window)
    }
}

impl Default for DpAligner {
    fn default() -> Self {
        Self::new()
    }
}

/// Chooses the step to record at a cell from the three candidate totals.
fn choose_path_step(
    step_scores: &StepScores,
    index_a: usize,
    index_b: usize,
    length_a: usize,
    length_b: usize,
) -> PathStep {
    let max_score = step_scores.max_score();

    // A diagonal move that achieves the maximum always wins.
    if step_scores.align_pair == max_score {
        return PathStep::AlignPair;
    }
    let first_wins = step_scores.insert_into_first == max_score;
    let second_wins = step_scores.insert_into_second == max_score;
    if first_wins && !second_wins {
        return PathStep::InsertIntoFirst;
    }
    if !first_wins && second_wins {
        return PathStep::InsertIntoSecond;
    }

    // Both insertions achieve the same maximum. The remaining choice must
    // be symmetric in the sense that flipping the two inputs produces the
    // mirrored alignment.
    //
    // Prefer the step that moves closer to the line between the start
    // corner and the end corner.
    let target_ratio = length_a as f64 / length_b as f64;
    let (first_a, first_b) = PathStep::InsertIntoFirst.indices_after(index_a, index_b);
    let (second_a, second_b) = PathStep::InsertIntoSecond.indices_after(index_a, index_b);
    let ratio_after_first = first_a as f64 / first_b as f64;
    let ratio_after_second = second_a as f64 / second_b as f64;
    let diff_after_first = (ratio_after_first - target_ratio).abs();
    let diff_after_second = (ratio_after_second - target_ratio).abs();
    if diff_after_first < diff_after_second {
        return PathStep::InsertIntoFirst;
    }
    if diff_after_second < diff_after_first {
        return PathStep::InsertIntoSecond;
    }

    // Still tied: prefer the step closer to the leading diagonal.
    let offset_after_first = (ratio_after_first - 1.0).abs();
    let offset_after_second = (ratio_after_second - 1.0).abs();
    if offset_after_second < offset_after_first {
        return PathStep::InsertIntoSecond;
    }
    PathStep::InsertIntoFirst
}
