use std::fmt;

use serde::{Deserialize, Serialize};

/// A zero-based point in a document.
///
/// Columns count Unicode scalar values, not bytes. Ordering is row first,
/// then column.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Advance past `text`, moving to the next row on every `\n`.
    pub fn advance(&mut self, text: &[char]) {
        for &c in text {
            if c == '\n' {
                self.row += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    /// The same point moved down by `rows`.
    pub fn offset_rows(self, rows: usize) -> Self {
        Self {
            row: self.row + rows,
            column: self.column,
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.row, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// A character-granularity span `[start, end)` between two positions.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Shorthand for a range given by its four coordinates.
    pub const fn from_coords(
        start_row: usize,
        start_column: usize,
        end_row: usize,
        end_column: usize,
    ) -> Self {
        Self {
            start: Position::new(start_row, start_column),
            end: Position::new(end_row, end_column),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if the span crosses a line break.
    pub fn is_multi_line(&self) -> bool {
        self.start.row != self.end.row
    }

    /// Returns `true` if `pos` lies in `[start, end)`.
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Number of columns covered on a single-line span; `0` otherwise.
    pub fn width(&self) -> usize {
        if self.is_multi_line() {
            0
        } else {
            self.end.column.saturating_sub(self.start.column)
        }
    }

    /// The same span moved down by `rows`.
    pub fn offset_rows(self, rows: usize) -> Self {
        Self {
            start: self.start.offset_rows(rows),
            end: self.end.offset_rows(rows),
        }
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}
