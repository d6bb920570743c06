//! Moving between chunks.

use serde::{Deserialize, Serialize};

use chunkdiff_types::{Chunk, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

/// Index of the last chunk starting at or before `row` on `side`.
///
/// `None` when `row` lies before the first chunk.
pub fn chunk_index_at(chunks: &[Chunk], row: usize, side: Side) -> Option<usize> {
    chunks
        .partition_point(|c| c.range(side).start <= row)
        .checked_sub(1)
}

/// The chunk to move to from `row`, one step in `direction`.
///
/// At either end of the list this stays on the current chunk.
pub fn adjacent_chunk(
    chunks: &[Chunk],
    row: usize,
    side: Side,
    direction: Direction,
) -> Option<usize> {
    let current = chunk_index_at(chunks, row, side);
    let target = match (direction, current) {
        (Direction::Next, None) => Some(0),
        (Direction::Next, Some(i)) => Some(i + 1),
        (Direction::Previous, Some(i)) => i.checked_sub(1),
        (Direction::Previous, None) => None,
    };
    target
        .filter(|&i| i < chunks.len())
        .or(current)
}

/// Row to place the cursor on when jumping to `chunk`: its last row on
/// `side`, or the insertion point when it has none there.
pub fn jump_row(chunk: &Chunk, side: Side) -> usize {
    let range = chunk.range(side);
    range.start.max(range.end.saturating_sub(1))
}
