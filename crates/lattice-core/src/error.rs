use thiserror::Error;

/// Errors raised by the lattice data model and dispatcher.
///
/// Everything here is raised synchronously at the call that detects it.
/// Out-of-range coordinates are never clamped or truncated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LatticeError {
    #[error("invalid shape: {reason}")]
    InvalidShape { reason: String },

    #[error("rank mismatch: shape has rank {expected}, index has rank {got}")]
    RankMismatch { expected: usize, got: usize },

    #[error("index {index} out of bounds for axis {axis} with length {dim}")]
    OutOfBounds {
        axis: usize,
        index: isize,
        dim: usize,
    },

    #[error("linear offset {offset} out of bounds for {len} elements")]
    LinearOutOfBounds { offset: usize, len: usize },

    #[error("storage has {got} elements, shape requires {needed}")]
    InsufficientStorage { needed: usize, got: usize },

    #[error("source has {got} elements, shape requires {expected}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("failed to initialize accelerator domain {index}: {msg}")]
    DomainInit { index: usize, msg: String },
}
