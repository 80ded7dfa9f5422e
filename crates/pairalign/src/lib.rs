//! Windowed dynamic-programming pairwise alignment.
//!
//! This crate implements the alignment core of a structure-comparison
//! pipeline: an exact Needleman-Wunsch-style aligner over an abstract
//! [`ScoreSource`], constrained to a diagonal band of configurable width.
//! The aligner works over integer scores so that results are exactly
//! reproducible across platforms and input orderings.
//!
//! The pieces, leaves first:
//!
//! - [`windowed_matrix`]: a rectangular matrix restricted to a band around
//!   the leading diagonal, with linear storage.
//! - [`path_step`]: the three moves an alignment path can make, and the
//!   per-move score bookkeeping.
//! - [`return_path`] and [`score_accumulation`]: the two banded matrices the
//!   recurrence populates, recording the locally-optimal move and the best
//!   achievable score from each cell to the end.
//! - [`aligner`]: the dynamic-programming sweep and its symmetric
//!   tie-breaking.
//! - [`alignment`] and [`strings`]: the emitted alignment, string
//!   formatting, gap counting and re-scoring.
//! - [`plotter`]: gnuplot rendering of a dynamic programme's matrices for
//!   debugging.
//!
//! Gap penalties follow the legacy convention of the original SSAP code:
//! the penalty is charged for every step inside a gap run, not just for
//! opening the gap.

pub mod aligner;
pub mod alignment;
pub mod error;
pub mod path_step;
pub mod plotter;
pub mod return_path;
pub mod score_accumulation;
pub mod score_source;
pub mod strings;
pub mod windowed_matrix;

pub use aligner::DpAligner;
pub use alignment::Alignment;
pub use error::{Error, Result};
pub use path_step::{PathStep, StepScores, ALL_PATH_STEPS};
pub use return_path::ReturnPathMatrix;
pub use score_accumulation::ScoreAccumulationMatrix;
pub use score_source::{MatrixScoreSource, ScoreSource, SequenceScoreSource};
pub use windowed_matrix::WindowedMatrix;

/// The score type used throughout the aligner.
///
/// The dynamic programme is defined over integers to keep it exactly
/// reproducible; 32 bits comfortably cover the score ranges produced by
/// residue-level scoring schemes.
pub type Score = i32;
