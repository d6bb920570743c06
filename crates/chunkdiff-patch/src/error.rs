//! Error types for patch formatting, parsing, and application.

use chunkdiff_types::{LineRange, Side, TypeError};

/// Errors that can occur while producing or consuming a patch.
///
/// Line numbers and hunk numbers are 1-based, as a reader of the patch
/// would count them.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PatchError {
    /// A line starting with `@@` is not a valid hunk header.
    #[error("malformed hunk header at line {line}: {text:?}")]
    MalformedHeader { line: usize, text: String },

    /// A line that belongs to neither the preamble nor a hunk body.
    #[error("unexpected line {line}: {text:?}")]
    UnexpectedLine { line: usize, text: String },

    /// The patch ended before a hunk had all the lines its header promised.
    #[error("hunk {hunk} is truncated: {missing_old} old and {missing_new} new lines missing")]
    TruncatedHunk {
        hunk: usize,
        missing_old: usize,
        missing_new: usize,
    },

    /// A hunk starts before the previous one ends.
    #[error("hunk {hunk} overlaps or precedes the previous hunk")]
    OverlappingHunks { hunk: usize },

    /// A context or removed line does not match the original text.
    #[error("hunk {hunk} does not apply at line {line}: expected {expected:?}, found {found:?}")]
    Mismatch {
        hunk: usize,
        line: usize,
        expected: String,
        found: Option<String>,
    },

    /// The hunk disagrees with the original about its final newline.
    #[error("hunk {hunk} disagrees with the original about the trailing newline")]
    NewlineMismatch { hunk: usize },

    /// The patch does not describe the whole file.
    #[error("patch does not cover the whole file: {0}")]
    IncompletePatch(String),

    /// The chunk list breaks the model's ordering invariants.
    #[error("invalid chunk list: {0}")]
    InvalidChunks(#[from] TypeError),

    /// The chunk list does not describe the given line arrays.
    #[error("chunks do not match the documents: {0}")]
    InconsistentChunks(String),

    /// A chunk range reaches past the end of its document.
    #[error("chunk range {range} is out of bounds for the {side} document ({len} lines)")]
    ChunkOutOfBounds {
        side: Side,
        range: LineRange,
        len: usize,
    },
}

/// Convenience alias for patch results.
pub type PatchResult<T> = Result<T, PatchError>;
