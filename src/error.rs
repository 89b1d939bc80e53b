use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for the network engine.
///
/// Every fallible operation returns one of these instead of panicking. The
/// training loop surfaces the first failure it sees and leaves the network's
/// weights in whatever partially-updated state existed at the failing row.
#[derive(Debug, Error)]
pub enum Error {
    /// Matrix operand dimensions are incompatible for the requested operation.
    #[error("shape mismatch: {left_cols}x{left_rows} is incompatible with {right_cols}x{right_rows}")]
    ShapeMismatch {
        left_cols: usize,
        left_rows: usize,
        right_cols: usize,
        right_rows: usize,
    },

    /// Matrix cell access beyond the stored bounds.
    #[error("index out of range: ({col}, {row}) outside a {cols}x{rows} matrix")]
    IndexOutOfRange {
        col: usize,
        row: usize,
        cols: usize,
        rows: usize,
    },

    /// A vector length disagrees with the expected dimension.
    #[error("size mismatch: expected {expected} values, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The network configuration cannot produce a valid network.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A persisted model document is missing fields, carries malformed
    /// matrix records, or references an unknown function selector id.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// External persistence read/write failure; only surfaced by the thin
    /// file helpers, never by the in-memory engine.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialization(err.to_string())
    }
}
