use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Half-open interval of rows `[start, end)` in one version of a document.
///
/// An empty range (`start == end`) marks an insertion point: the row before
/// which the other side's lines would go.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    /// First row in the range (inclusive).
    pub start: usize,
    /// Row just past the range (exclusive).
    pub end: usize,
}

impl LineRange {
    /// Create a new range.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty range positioned at `row`.
    pub const fn empty_at(row: usize) -> Self {
        Self {
            start: row,
            end: row,
        }
    }

    /// Number of rows covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the range covers no rows.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns `true` if `row` lies inside the range.
    pub fn contains(&self, row: usize) -> bool {
        self.start <= row && row < self.end
    }

    /// The range as a slice index.
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for LineRange {
    fn from(r: Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl fmt::Debug for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
