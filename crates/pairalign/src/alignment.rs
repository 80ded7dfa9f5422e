//! The alignment emitted by a traceback, and operations over aligned
//! strings.

use crate::{path_step::gap_penalty_of_step, Error, PathStep, Result, Score, ScoreSource};

/// A pairwise alignment: an ordered list of columns, each holding the
/// 0-based position aligned at that column for each sequence, or `None`
/// where the sequence has a gap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Alignment {
    /// The aligned position pairs, in order from the starts of the
    /// sequences to their ends.
    entries: Vec<(Option<usize>, Option<usize>)>,
}

impl Alignment {
    /// Creates an empty alignment.
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends the column produced by taking `step` at `(index_a, index_b)`.
    pub fn push_step(&mut self, step: PathStep, index_a: usize, index_b: usize) {
        let entry = match step {
            PathStep::AlignPair => (Some(index_a), Some(index_b)),
            PathStep::InsertIntoFirst => (Some(index_a), None),
            PathStep::InsertIntoSecond => (None, Some(index_b)),
        };
        self.entries.push(entry);
    }

    /// The aligned position pairs.
    #[must_use]
    pub fn entries(&self) -> &[(Option<usize>, Option<usize>)] {
        &self.entries
    }

    /// The number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the alignment has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The path steps of this alignment, in order, as a mirror-image swap
    /// of the two sequences' roles.
    ///
    /// `AlignPair` columns stay, while the two insertions exchange places.
    /// Useful for checking the symmetry of the aligner.
    pub fn mirrored(&self) -> Self {
        Self {
            entries: self.entries.iter().map(|&(a, b)| (b, a)).collect(),
        }
    }
}

/// Renders an alignment of the two given strings, inserting `-` at gap
/// columns.
///
/// # Errors
///
/// `InvalidShape` if an aligned position is outside its string.
pub fn format_alignment_strings(
    alignment: &Alignment,
    string_a: &str,
    string_b: &str,
) -> Result<(String, String)> {
    let bytes_a = string_a.as_bytes();
    let bytes_b = string_b.as_bytes();
    let mut aligned_a = String::with_capacity(alignment.len());
    let mut aligned_b = String::with_capacity(alignment.len());
    for &(position_a, position_b) in alignment.entries() {
        aligned_a.push(char_at(bytes_a, position_a)?);
        aligned_b.push(char_at(bytes_b, position_b)?);
    }
    Ok((aligned_a, aligned_b))
}

/// The character for one side of an alignment column, `-` for a gap.
fn char_at(bytes: &[u8], position: Option<usize>) -> Result<char> {
    position.map_or(Ok('-'), |index| {
        bytes.get(index).map(|&byte| byte as char).ok_or_else(|| {
            Error::InvalidShape(format!(
                "aligned position {index} is outside a sequence of length {}",
                bytes.len()
            ))
        })
    })
}

/// Counts the gap runs and gap extensions in one aligned string.
///
/// A run of `k` consecutive gap characters counts as one gap and `k - 1`
/// extensions.
#[must_use]
pub fn num_gaps_and_extensions(aligned: &str) -> (usize, usize) {
    let mut num_gaps = 0;
    let mut num_extensions = 0;
    let mut in_gap = false;
    for character in aligned.chars() {
        if character == '-' {
            if in_gap {
                num_extensions += 1;
            } else {
                num_gaps += 1;
            }
            in_gap = true;
        } else {
            in_gap = false;
        }
    }
    (num_gaps, num_extensions)
}

/// Re-scores an alignment against the score source and gap penalty that
/// produced it.
///
/// This replays the recurrence: aligned columns contribute their pair
/// score, and a gap column is charged the penalty only while the opposite
/// sequence still has unconsumed positions (the forced tail columns emitted
/// after one sequence is exhausted are free, exactly as in the dynamic
/// programme). The result equals the total the aligner reported.
#[must_use]
pub fn rescore_alignment<S: ScoreSource>(
    alignment: &Alignment,
    scorer: &S,
    gap_penalty: Score,
) -> Score {
    let length_a = scorer.length_a();
    let length_b = scorer.length_b();
    let mut consumed_a = 0;
    let mut consumed_b = 0;
    let mut total = 0;
    for &(position_a, position_b) in alignment.entries() {
        match (position_a, position_b) {
            (Some(index_a), Some(index_b)) => {
                total += scorer.score(index_a, index_b);
                consumed_a += 1;
                consumed_b += 1;
            }
            (Some(_), None) => {
                if consumed_b < length_b {
                    total -= gap_penalty_of_step(PathStep::InsertIntoFirst, gap_penalty);
                }
                consumed_a += 1;
            }
            (None, Some(_)) => {
                if consumed_a < length_a {
                    total -= gap_penalty_of_step(PathStep::InsertIntoSecond, gap_penalty);
                }
                consumed_b += 1;
            }
            (None, None) => {}
        }
    }
    total
}

/// Re-scores a pair of aligned strings under identity scoring.
///
/// Matching non-gap characters score 1, mismatches 0, and gap columns are
/// charged as in [`rescore_alignment`].
#[must_use]
pub fn score_of_aligned_strings(aligned_a: &str, aligned_b: &str, gap_penalty: Score) -> Score {
    let length_a = aligned_a.chars().filter(|&c| c != '-').count();
    let length_b = aligned_b.chars().filter(|&c| c != '-').count();
    let mut consumed_a = 0;
    let mut consumed_b = 0;
    let mut total = 0;
    for (char_a, char_b) in aligned_a.chars().zip(aligned_b.chars()) {
        match (char_a == '-', char_b == '-') {
            (false, false) => {
                total += Score::from(char_a == char_b);
                consumed_a += 1;
                consumed_b += 1;
            }
            (false, true) => {
                if consumed_b < length_b {
                    total -= gap_penalty;
                }
                consumed_a += 1;
            }
            (true, false) => {
                if consumed_a < length_a {
                    total -= gap_penalty;
                }
                consumed_b += 1;
            }
            (true, true) => {}
        }
    }
    total
}
