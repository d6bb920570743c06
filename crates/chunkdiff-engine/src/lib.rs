//! Diff engine for chunkdiff.
//!
//! Computes minimal edit scripts between two line sequences and refines each
//! modified region to character granularity. Line comparison runs over small
//! integer codes assigned per call; the shortest edit script comes from the
//! Myers algorithm in `similar`, followed by a semantic cleanup pass that
//! moves ambiguous boundaries to where a human would put them.
//!
//! # Key Types
//!
//! - [`diff_lines`] / [`LineDiff`] -- Line-level diff producing [`Chunk`]s
//! - [`diff_chars`] -- Character-level diff producing [`CharChange`]s
//! - [`DiffOptions`] -- Whitespace handling, time budget, size limit
//!
//! [`Chunk`]: chunkdiff_types::Chunk
//! [`CharChange`]: chunkdiff_types::CharChange

mod budget;
pub mod chars;
mod cleanup;
mod interner;
pub mod lines;
pub mod options;
mod script;
mod semantic;

pub use chars::diff_chars;
pub use lines::{diff_lines, LineDiff};
pub use options::DiffOptions;
