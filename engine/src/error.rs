use thiserror::Error;

use crate::grid::{Epoch, Position};

/// Errors produced by grid construction, mutation and labeling.
///
/// Traversal never fails on a well formed grid; these only guard the edges of
/// the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("grid of {width}x{height} needs {expected} block types, got {actual}")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("position {position} is outside a {width}x{height} grid")]
    OutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    /// The epoch handed to a labeling pass did not advance.
    #[error("epoch {given} is not newer than the last labeled epoch {last}")]
    StaleEpoch { given: Epoch, last: Epoch },

    /// Every epoch value has been used; no further pass can be ordered after
    /// the last one.
    #[error("epochs exhausted after epoch {last}")]
    EpochExhausted { last: Epoch },

    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    /// The task failed to complete (executor was dropped or task panicked).
    #[error("task failed to complete")]
    TaskFailed,
}

pub type Result<T, E = GridError> = std::result::Result<T, E>;
