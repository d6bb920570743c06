//! Unified patches for chunkdiff.
//!
//! Renders chunk lists as byte-exact unified diffs, parses such diffs back,
//! and applies them to the original text with strict, atomic verification.
//!
//! # Key Types
//!
//! - [`Patch`] / [`Hunk`] / [`HunkLine`] -- Parsed or generated single-file patch
//! - [`format_patch`] / [`create_patch`] -- Chunk list to patch
//! - [`apply`] / [`apply_patch`] -- Patch to new text, all or nothing
//! - [`reconstruct`] -- Both versions from a full-context patch
//! - [`copy_chunk`] -- Move one change across to the other version
//! - [`Document`] -- Lines plus trailing-newline flag

pub mod apply;
pub mod error;
pub mod format;
pub mod model;
pub mod parse;
pub mod reconstruct;
pub mod text;
pub mod transfer;

pub use apply::{apply, apply_patch};
pub use error::{PatchError, PatchResult};
pub use format::{create_patch, format_patch, PatchOptions};
pub use model::{Hunk, HunkLine, Patch, NO_NEWLINE_MARKER};
pub use reconstruct::{reconstruct, reconstruct_text, Versions};
pub use text::{split_lines, Document};
pub use transfer::copy_chunk;
