//! Error types for the alignment core.

/// The errors the alignment core can produce.
///
/// The dynamic programme itself is total over its stated domain; errors
/// arise only from invalid shapes at construction time or out-of-band
/// access to a windowed matrix.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A zero length, a window smaller than the length difference allows,
    /// or mismatched matrix dimensions.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// An access to a windowed-matrix cell outside the stored band.
    #[error("invalid index: {0}")]
    InvalidIndex(String),

    /// An I/O failure while writing a matrix plot.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// A `Result` with this crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
