//! Chunk model for chunkdiff.
//!
//! This crate provides the plain data types exchanged between the diff engine,
//! the patch formatter, and the position mapper. Every other chunkdiff crate
//! depends on `chunkdiff-types`.
//!
//! # Key Types
//!
//! - [`Position`] -- Zero-based `(row, column)` point, columns counted in `char`s
//! - [`LineRange`] -- Half-open row interval `[start, end)`
//! - [`TextRange`] -- Character-granularity span between two positions
//! - [`CharChange`] -- Character-level sub-edit inside a modified chunk
//! - [`Chunk`] -- One maximal contiguous difference between two versions
//! - [`Side`] -- Which version of the document a coordinate refers to

pub mod chunk;
pub mod error;
pub mod position;
pub mod range;

pub use chunk::{validate_chunks, CharChange, Chunk, ChunkKind, Side};
pub use error::{TypeError, TypeResult};
pub use position::{Position, TextRange};
pub use range::LineRange;
