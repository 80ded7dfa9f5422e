//! The matrix of locally-optimal steps from each cell towards the ends of
//! the two sequences.
//!
//! Note that this is *not* symmetric: it always records return paths from
//! each point towards the ends of the sequences, never towards their
//! starts. There is a unique optimal step out of each point towards the
//! end, whereas up to three different paths may lead out of a point back
//! towards the start.

use crate::{Alignment, Error, PathStep, Result, WindowedMatrix};

/// A windowed matrix of [`PathStep`] values, each the locally-optimal next
/// move from its cell towards the bottom-right of the matrix.
#[derive(Clone, Debug)]
#[must_use]
pub struct ReturnPathMatrix {
    /// The banded step storage.
    steps: WindowedMatrix<PathStep>,
}

impl ReturnPathMatrix {
    /// Creates a matrix for the given lengths and window width.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if either length is zero or the window cannot span
    /// the length difference.
    pub fn new(length_a: usize, length_b: usize, window: usize) -> Result<Self> {
        Ok(Self {
            steps: WindowedMatrix::new(length_a, length_b, window)?,
        })
    }

    /// Re-shapes the matrix for reuse.
    ///
    /// # Errors
    ///
    /// `InvalidShape` as for [`Self::new`].
    pub fn reset(&mut self, length_a: usize, length_b: usize, window: usize) -> Result<()> {
        self.steps.reset(length_a, length_b, window)
    }

    /// The number of rows.
    #[must_use]
    pub const fn length_a(&self) -> usize {
        self.steps.length_a()
    }

    /// The number of columns.
    #[must_use]
    pub const fn length_b(&self) -> usize {
        self.steps.length_b()
    }

    /// The requested window width.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.steps.window()
    }

    /// The first and last in-band columns of the 0-based row `index_a`.
    #[must_use]
    pub fn b_window_start_and_stop_for_a(&self, index_a: usize) -> (usize, usize) {
        (
            self.steps.band_start_for_row(index_a),
            self.steps.band_stop_for_row(index_a),
        )
    }

    /// Stores the step to take from `(index_a, index_b)` towards the end.
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if the cell is outside the band, or if the step would
    /// leave the band: a cell at the bottom of its column's window cannot
    /// hold `InsertIntoFirst`, and one at the top cannot hold
    /// `InsertIntoSecond`.
    pub fn set_step_towards_end(
        &mut self,
        index_a: usize,
        index_b: usize,
        step: PathStep,
    ) -> Result<()> {
        let (next_a, next_b) = step.indices_after(index_a, index_b);
        let leaves_matrix = next_a >= self.length_a() || next_b >= self.length_b();
        if !leaves_matrix && !self.steps.in_band(next_a, next_b) {
            return Err(Error::InvalidIndex(format!(
                "step {step:?} from ({index_a}, {index_b}) would leave the window"
            )));
        }
        self.steps.set(index_a, index_b, step)
    }

    /// The stored step from `(index_a, index_b)` towards the end.
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if the cell is outside the band.
    pub fn get_step_towards_end(&self, index_a: usize, index_b: usize) -> Result<PathStep> {
        self.steps.get(index_a, index_b)
    }
}

/// Traces the stored return path from `(0, 0)` and emits the alignment.
///
/// Once one sequence is exhausted the remaining columns are forced
/// insertions of the other, emitted without consulting the matrix.
///
/// # Errors
///
/// `InvalidIndex` if the walk reads a cell outside the band, which cannot
/// happen for a matrix populated by the aligner.
pub fn make_alignment(return_path: &ReturnPathMatrix) -> Result<Alignment> {
    let length_a = return_path.length_a();
    let length_b = return_path.length_b();
    let mut alignment = Alignment::new();
    let (mut index_a, mut index_b) = (0, 0);
    while index_a < length_a || index_b < length_b {
        let step = if index_a >= length_a {
            PathStep::InsertIntoSecond
        } else if index_b >= length_b {
            PathStep::InsertIntoFirst
        } else {
            return_path.get_step_towards_end(index_a, index_b)?
        };
        alignment.push_step(step, index_a, index_b);
        (index_a, index_b) = step.indices_after(index_a, index_b);
    }
    Ok(alignment)
}
