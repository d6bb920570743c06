use thiserror::Error;

use crate::range::LineRange;

/// Errors produced when a chunk list breaks the model's invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("chunk {index} is empty on both sides")]
    EmptyChunk { index: usize },

    #[error("chunk {index} has an inverted range: {range}")]
    InvertedRange { index: usize, range: LineRange },

    #[error("chunk {index} overlaps or touches the previous chunk")]
    Overlapping { index: usize },

    #[error("chunk {index} breaks lock-step: unchanged gap is {old_gap} rows old, {new_gap} rows new")]
    UnbalancedGap {
        index: usize,
        old_gap: usize,
        new_gap: usize,
    },

    #[error("chunk {index} carries character changes but is not a modification")]
    UnexpectedCharChanges { index: usize },
}

/// Convenience alias for model validation results.
pub type TypeResult<T> = Result<T, TypeError>;
