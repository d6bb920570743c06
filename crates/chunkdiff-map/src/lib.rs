//! Coordinate services over a chunk list.
//!
//! Everything here is read-only over chunks produced by the diff engine and
//! cheap enough to run on every cursor move.
//!
//! # Key Types
//!
//! - [`PositionMapper`] / [`map_position`] -- Old/new position translation
//! - [`chunk_index_at`] / [`adjacent_chunk`] / [`jump_row`] -- Chunk navigation
//! - [`unchanged_regions`] / [`FoldOptions`] -- Collapsible unchanged stretches

pub mod mapper;
pub mod navigate;
pub mod regions;

pub use mapper::{map_position, PositionMapper};
pub use navigate::{adjacent_chunk, chunk_index_at, jump_row, Direction};
pub use regions::{unchanged_regions, FoldOptions, UnchangedRegion};
