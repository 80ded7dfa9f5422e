//! Error types for the clustering core.

/// The errors the clustering core can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A self-link, an empty cutoff list where cutoffs are required, or a
    /// malformed input line.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A registry lookup for a name that was never added.
    #[error("unknown name: {0}")]
    UnknownName(String),

    /// A registry lookup for an id that was never assigned.
    #[error("unknown id: {0}")]
    UnknownId(usize),

    /// An internal consistency check failed; indicates a bug, not bad
    /// input.
    #[error("internal invariant violated: {0}")]
    Unreachable(String),

    /// An I/O failure at one of the file boundaries.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// A `Result` with this crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
