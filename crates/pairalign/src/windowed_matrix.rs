//! A memory-efficient 2-D matrix restricted to a band around the leading
//! diagonal.
//!
//! Here is a 7 x 9 matrix with a requested window size of 5:
//!
//! ```text
//!     *  *  *  +  .  .  .  .  .
//!     +  *  *  *  +  .  .  .  .
//!     .  +  *  *  *  +  .  .  .
//!     .  .  +  *  *  *  +  .  .
//!     .  .  .  +  *  *  *  +  .
//!     .  .  .  .  +  *  *  *  +
//!     .  .  .  .  .  +  *  *  *
//! ```
//!
//! (a full stop marks a cell that is inactive because it lies outside the
//! window)
//!
//! The asterisks mark the central window defined by the two diagonals
//! through the top-left and bottom-right corners; its size is always the
//! difference in lengths plus one, and any requested window must be at
//! least that large. When the excess over the central window is even it is
//! split evenly between the two sides. When it is odd, the spare column
//! goes on the side nearest the start of the longer edge; if the lengths
//! are equal there is no way to pick a side, so one is added to *both*
//! sides, widening the stored window by one. That rule is what guarantees
//! that swapping the dimensions always yields the exact transpose.
//!
//! The window-placement algebra below is 1-based, matching the SSAP
//! routines this storage was built for; [`WindowedMatrix`] itself exposes a
//! 0-based interface and translates internally.

use crate::{Error, Result};

/// A window size that guarantees no cell of an `length_a` x `length_b`
/// matrix is pruned.
#[must_use]
pub const fn window_width_for_full_matrix(length_a: usize, length_b: usize) -> usize {
    length_a + length_b
}

/// Checks that both lengths are non-zero and the window is wide enough to
/// span the difference in lengths.
///
/// # Errors
///
/// `InvalidShape` if either length is zero or the window is smaller than
/// the magnitude of the length difference plus one.
pub fn check_lengths_and_window(length_a: usize, length_b: usize, window: usize) -> Result<()> {
    if length_a == 0 || length_b == 0 {
        return Err(Error::InvalidShape(format!(
            "matrix lengths must be non-zero (got {length_a} and {length_b})"
        )));
    }
    let length_difference = (length_a as i64 - length_b as i64).unsigned_abs() as usize;
    if window < 1 + length_difference {
        return Err(Error::InvalidShape(format!(
            "window size {window} is too small for lengths {length_a} and {length_b} \
             (must be at least {})",
            1 + length_difference
        )));
    }
    Ok(())
}

/// The number of window columns above and below the leading diagonal.
///
/// Where `length_a` is less than `length_b` the lower part is the smaller;
/// where it is greater, the lower part is the larger. An odd excess that
/// cannot be assigned to either side (equal lengths) widens both sides.
///
/// # Errors
///
/// `InvalidShape` if the lengths and window are not valid together.
pub fn window_upper_and_lower_part_widths(
    length_a: usize,
    length_b: usize,
    window: usize,
) -> Result<(usize, usize)> {
    check_lengths_and_window(length_a, length_b, window)?;
    let length_difference = length_a as i64 - length_b as i64;

    // Divide the window less one (for the leading diagonal itself) between
    // the two parts, keeping the correct part length_difference larger.
    let upper = ((window as i64 - 1 - length_difference) / 2) as usize;
    let lower = ((window as i64 - 1 + length_difference) / 2) as usize;

    // Rounding may have left the window too narrow; add the increments that
    // restore the requested width.
    let is_too_narrow = upper + lower + 1 < window;
    let upper_increment = usize::from(is_too_narrow && upper <= lower);
    let lower_increment = usize::from(is_too_narrow && upper >= lower);

    Ok((upper + upper_increment, lower + lower_increment))
}

/// The offset added to a 1-based `a` index to locate its storage row within
/// the band of the given 1-based `b` index.
///
/// The result may be negative or exceed `length_a` for cells near the ends
/// of the diagonal; only in-band cells map to valid storage.
///
/// # Errors
///
/// `InvalidShape` if the lengths and window are not valid together.
pub fn window_indexing_offset_for_b(
    length_a: usize,
    length_b: usize,
    window: usize,
    index_b: usize,
) -> Result<i64> {
    let (upper, _) = window_upper_and_lower_part_widths(length_a, length_b, window)?;
    Ok(upper as i64 - index_b as i64)
}

/// The storage-row index (1-based) for the cell at the given 1-based
/// `(a, b)` indices.
///
/// # Errors
///
/// `InvalidShape` if the lengths and window are not valid together.
pub fn window_matrix_a_index(
    length_a: usize,
    length_b: usize,
    window: usize,
    index_a: usize,
    index_b: usize,
) -> Result<i64> {
    let offset = window_indexing_offset_for_b(length_a, length_b, window, index_b)?;
    Ok(index_a as i64 + offset)
}

/// The 1-based `a` index at which the window starts in the column of the
/// given 1-based `b` index.
///
/// Swapping the lengths gives the transpose, so this also serves as the
/// start of the window in a row.
///
/// # Errors
///
/// `InvalidShape` if the lengths and window are not valid together;
/// `InvalidIndex` if `index_b` is outside `[1, length_b]`.
pub fn window_start_a_for_b(
    length_a: usize,
    length_b: usize,
    window: usize,
    index_b: usize,
) -> Result<usize> {
    let (upper, _) = window_upper_and_lower_part_widths(length_a, length_b, window)?;
    check_index_b(length_b, index_b)?;
    let unclamped = index_b as i64 - upper as i64;
    Ok(unclamped.clamp(1, length_a as i64) as usize)
}

/// The 1-based `a` index of the last in-window cell in the column of the
/// given 1-based `b` index (the last cell itself, not one-past-the-end).
///
/// # Errors
///
/// `InvalidShape` if the lengths and window are not valid together;
/// `InvalidIndex` if `index_b` is outside `[1, length_b]`.
pub fn window_stop_a_for_b(
    length_a: usize,
    length_b: usize,
    window: usize,
    index_b: usize,
) -> Result<usize> {
    let (_, lower) = window_upper_and_lower_part_widths(length_a, length_b, window)?;
    check_index_b(length_b, index_b)?;
    let unclamped = index_b + lower;
    Ok(unclamped.clamp(1, length_a))
}

/// Checks a 1-based `b` index against its length.
fn check_index_b(length_b: usize, index_b: usize) -> Result<()> {
    if index_b < 1 || index_b > length_b {
        return Err(Error::InvalidIndex(format!(
            "index {index_b} for b is out of the range [1, {length_b}]"
        )));
    }
    Ok(())
}

/// A rectangular `length_a` x `length_b` matrix in which only the cells
/// within a diagonal band of the requested width are storable.
///
/// Storage is a single vector; the two-dimensional coordinates are
/// translated internally. All public indices are 0-based.
#[derive(Clone, Debug)]
#[must_use]
pub struct WindowedMatrix<T> {
    /// The number of rows in the matrix.
    length_a: usize,
    /// The number of columns in the matrix.
    length_b: usize,
    /// The requested window width.
    ///
    /// The stored band may be one wider when the lengths are equal and the
    /// excess over the central window is odd.
    window: usize,
    /// The band width above the leading diagonal.
    upper: usize,
    /// The band width below the leading diagonal.
    lower: usize,
    /// The linear cell storage, `length_b` bands of `upper + lower + 1`.
    data: Vec<T>,
}

impl<T: Clone + Default> WindowedMatrix<T> {
    /// Creates a matrix with every in-band cell set to `T::default()`.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if either length is zero or the window cannot span
    /// the length difference.
    pub fn new(length_a: usize, length_b: usize, window: usize) -> Result<Self> {
        let (upper, lower) = window_upper_and_lower_part_widths(length_a, length_b, window)?;
        let data = vec![T::default(); length_b * (upper + lower + 1)];
        Ok(Self {
            length_a,
            length_b,
            window,
            upper,
            lower,
            data,
        })
    }

    /// Re-shapes the matrix for reuse, resetting every cell to
    /// `T::default()`.
    ///
    /// # Errors
    ///
    /// `InvalidShape` as for [`Self::new`]; on error the matrix is left
    /// unchanged.
    pub fn reset(&mut self, length_a: usize, length_b: usize, window: usize) -> Result<()> {
        let (upper, lower) = window_upper_and_lower_part_widths(length_a, length_b, window)?;
        self.length_a = length_a;
        self.length_b = length_b;
        self.window = window;
        self.upper = upper;
        self.lower = lower;
        self.data.clear();
        self.data.resize(length_b * (upper + lower + 1), T::default());
        Ok(())
    }

    /// The number of rows.
    #[must_use]
    pub const fn length_a(&self) -> usize {
        self.length_a
    }

    /// The number of columns.
    #[must_use]
    pub const fn length_b(&self) -> usize {
        self.length_b
    }

    /// The requested window width.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Whether the 0-based cell `(index_a, index_b)` lies within the band.
    #[must_use]
    pub fn in_band(&self, index_a: usize, index_b: usize) -> bool {
        index_a < self.length_a
            && index_b < self.length_b
            && index_a + self.upper >= index_b
            && index_a <= index_b + self.lower
    }

    /// The first in-band row of the 0-based column `index_b`.
    #[must_use]
    pub fn band_start_for_col(&self, index_b: usize) -> usize {
        index_b.saturating_sub(self.upper).min(self.length_a - 1)
    }

    /// The last in-band row of the 0-based column `index_b`.
    #[must_use]
    pub fn band_stop_for_col(&self, index_b: usize) -> usize {
        (index_b + self.lower).min(self.length_a - 1)
    }

    /// The first in-band column of the 0-based row `index_a`.
    #[must_use]
    pub fn band_start_for_row(&self, index_a: usize) -> usize {
        index_a.saturating_sub(self.lower).min(self.length_b - 1)
    }

    /// The last in-band column of the 0-based row `index_a`.
    #[must_use]
    pub fn band_stop_for_row(&self, index_a: usize) -> usize {
        (index_a + self.upper).min(self.length_b - 1)
    }

    /// Reads the cell at the 0-based `(index_a, index_b)`.
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if the cell lies outside the band.
    pub fn get(&self, index_a: usize, index_b: usize) -> Result<T> {
        let index = self.internal_index(index_a, index_b)?;
        Ok(self.data[index].clone())
    }

    /// Writes the cell at the 0-based `(index_a, index_b)`.
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if the cell lies outside the band.
    pub fn set(&mut self, index_a: usize, index_b: usize, value: T) -> Result<()> {
        let index = self.internal_index(index_a, index_b)?;
        self.data[index] = value;
        Ok(())
    }

    /// Translates a 0-based cell to its storage slot.
    fn internal_index(&self, index_a: usize, index_b: usize) -> Result<usize> {
        if !self.in_band(index_a, index_b) {
            return Err(Error::InvalidIndex(format!(
                "indices {index_a}, {index_b} are not within the window of a {} x {} matrix \
                 with window width {}",
                self.length_a, self.length_b, self.window
            )));
        }
        let band_width = self.upper + self.lower + 1;
        // In-band implies index_a + upper >= index_b, so this cannot wrap.
        Ok(index_b * band_width + (index_a + self.upper - index_b))
    }
}
