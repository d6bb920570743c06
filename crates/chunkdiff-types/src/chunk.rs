use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::position::TextRange;
use crate::range::LineRange;

/// Which version of a document a coordinate refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Old,
    New,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Old => Side::New,
            Side::New => Side::Old,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Old => f.write_str("old"),
            Side::New => f.write_str("new"),
        }
    }
}

/// Derived classification of a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Lines exist only in the new version.
    Insert,
    /// Lines exist only in the old version.
    Delete,
    /// Lines were replaced.
    Modify,
}

/// A character-granularity edit inside a modified chunk.
///
/// Coordinates are document-relative, not relative to the enclosing chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharChange {
    pub old: TextRange,
    pub new: TextRange,
}

impl CharChange {
    pub fn new(old: TextRange, new: TextRange) -> Self {
        Self { old, new }
    }

    pub fn range(&self, side: Side) -> TextRange {
        match side {
            Side::Old => self.old,
            Side::New => self.new,
        }
    }
}

/// One maximal contiguous difference between two versions of a document.
///
/// Produced only by the diff engine and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chunk {
    /// Rows of the old version covered by this chunk.
    pub old: LineRange,
    /// Rows of the new version covered by this chunk.
    pub new: LineRange,
    /// Character-level refinement; only modifications carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_changes: Option<Vec<CharChange>>,
}

impl Chunk {
    /// A chunk without character refinement.
    pub fn new(old: LineRange, new: LineRange) -> Self {
        Self {
            old,
            new,
            char_changes: None,
        }
    }

    /// A modification with its character changes attached.
    pub fn with_char_changes(old: LineRange, new: LineRange, changes: Vec<CharChange>) -> Self {
        Self {
            old,
            new,
            char_changes: Some(changes),
        }
    }

    pub fn kind(&self) -> ChunkKind {
        if self.old.is_empty() {
            ChunkKind::Insert
        } else if self.new.is_empty() {
            ChunkKind::Delete
        } else {
            ChunkKind::Modify
        }
    }

    pub fn range(&self, side: Side) -> LineRange {
        match side {
            Side::Old => self.old,
            Side::New => self.new,
        }
    }

    /// Rows gained (positive) or lost (negative) in the new version.
    pub fn row_delta(&self) -> isize {
        self.new.len() as isize - self.old.len() as isize
    }

    /// The character changes, or an empty slice.
    pub fn char_changes(&self) -> &[CharChange] {
        self.char_changes.as_deref().unwrap_or_default()
    }
}

/// Check that a chunk list is ordered, separated, and lock-step.
///
/// Chunk lists built by the engine always pass; this exists for lists that
/// arrive from elsewhere (deserialized, hand-built).
pub fn validate_chunks(chunks: &[Chunk]) -> TypeResult<()> {
    let mut old_pos = 0usize;
    let mut new_pos = 0usize;

    for (index, chunk) in chunks.iter().enumerate() {
        for range in [chunk.old, chunk.new] {
            if range.start > range.end {
                return Err(TypeError::InvertedRange { index, range });
            }
        }
        if chunk.old.is_empty() && chunk.new.is_empty() {
            return Err(TypeError::EmptyChunk { index });
        }
        if chunk.char_changes.is_some() && chunk.kind() != ChunkKind::Modify {
            return Err(TypeError::UnexpectedCharChanges { index });
        }
        if chunk.old.start < old_pos || chunk.new.start < new_pos {
            return Err(TypeError::Overlapping { index });
        }

        let old_gap = chunk.old.start - old_pos;
        let new_gap = chunk.new.start - new_pos;
        if old_gap != new_gap {
            return Err(TypeError::UnbalancedGap {
                index,
                old_gap,
                new_gap,
            });
        }
        if index > 0 && old_gap == 0 {
            return Err(TypeError::Overlapping { index });
        }

        old_pos = chunk.old.end;
        new_pos = chunk.new.end;
    }

    Ok(())
}
