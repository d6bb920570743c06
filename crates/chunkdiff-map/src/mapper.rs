//! Translating positions between the two versions of a document.
//!
//! Outside chunks the versions move in lock-step, so a row only needs the
//! row delta of the chunk above it. Inside a modified chunk the character
//! changes anchor the translation: text inside a change maps into the
//! corresponding change on the other side, and unchanged text maps relative
//! to the nearest change before it.

use chunkdiff_types::{Chunk, Position, Side, TextRange};

use crate::navigate::chunk_index_at;

/// Maps positions between the old and new lines the chunks were computed
/// from.
#[derive(Clone, Copy, Debug)]
pub struct PositionMapper<'a, S> {
    chunks: &'a [Chunk],
    old: &'a [S],
    new: &'a [S],
}

/// Where a lookup landed before indentation and clamping.
struct Landing {
    row: usize,
    column: usize,
    ignore_indent: bool,
}

impl Landing {
    fn at(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            ignore_indent: false,
        }
    }

    fn exact(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            ignore_indent: true,
        }
    }
}

impl<'a, S: AsRef<str>> PositionMapper<'a, S> {
    pub fn new(chunks: &'a [Chunk], old: &'a [S], new: &'a [S]) -> Self {
        Self { chunks, old, new }
    }

    fn lines(&self, side: Side) -> &'a [S] {
        match side {
            Side::Old => self.old,
            Side::New => self.new,
        }
    }

    /// Translate `pos` from the `from` version into the other one.
    ///
    /// The result always lies inside the destination document.
    pub fn map_position(&self, pos: Position, from: Side) -> Position {
        let to = from.opposite();
        let landing = self.land(pos, from);

        let mut column = landing.column;
        if !landing.ignore_indent {
            let source_indent = indent(self.lines(from), pos.row);
            let dest_indent = indent(self.lines(to), landing.row);
            column = if source_indent >= dest_indent {
                column.saturating_sub(source_indent - dest_indent)
            } else {
                column + (dest_indent - source_indent)
            };
        }

        clamp(self.lines(to), landing.row, column)
    }

    /// Translate both ends of `range`.
    pub fn map_range(&self, range: TextRange, from: Side) -> TextRange {
        TextRange::new(
            self.map_position(range.start, from),
            self.map_position(range.end, from),
        )
    }

    fn land(&self, pos: Position, from: Side) -> Landing {
        let to = from.opposite();
        let Some(index) = chunk_index_at(self.chunks, pos.row, from) else {
            return Landing::at(pos.row, pos.column);
        };
        let chunk = &self.chunks[index];
        let source = chunk.range(from);
        let dest = chunk.range(to);

        if pos.row >= source.end {
            return Landing::at(pos.row - source.end + dest.end, pos.column);
        }
        if dest.is_empty() {
            return Landing::exact(dest.start, 0);
        }

        let by_row = (dest.start + (pos.row - source.start)).min(dest.end - 1);
        let mut landing = Landing::at(by_row, pos.column);

        for change in chunk.char_changes() {
            let f = change.range(from);
            let t = change.range(to);

            if f.end.row < pos.row {
                // Unchanged rows below a change keep their distance to it.
                landing = Landing::at(t.end.row + (pos.row - f.end.row), pos.column);
                continue;
            }
            if f.start.row > pos.row || pos < f.start {
                break;
            }

            if f.contains(pos) {
                if f.is_multi_line() {
                    landing = self.inside_multi_line(pos, f, t, to);
                } else {
                    let offset = pos.column - f.start.column;
                    let offset = if t.is_multi_line() {
                        offset
                    } else {
                        offset.min(t.width())
                    };
                    landing = Landing::exact(t.start.row, t.start.column + offset);
                }
                break;
            }

            // Same row, at or past the end of the change.
            landing = Landing::exact(t.end.row, t.end.column + (pos.column - f.end.column));
        }

        landing
    }

    fn inside_multi_line(&self, pos: Position, f: TextRange, t: TextRange, to: Side) -> Landing {
        let row = t.start.row + (pos.row - f.start.row);
        let last_row = if t.end.column == 0 && t.end.row > t.start.row {
            t.end.row - 1
        } else {
            t.end.row
        };
        if row > last_row {
            Landing::exact(last_row, line_len(self.lines(to), last_row))
        } else {
            Landing::at(row, pos.column)
        }
    }
}

/// Translate `pos` between versions; `from_old` names the source side.
pub fn map_position<S: AsRef<str>>(
    chunks: &[Chunk],
    old: &[S],
    new: &[S],
    pos: Position,
    from_old: bool,
) -> Position {
    let from = if from_old { Side::Old } else { Side::New };
    PositionMapper::new(chunks, old, new).map_position(pos, from)
}

fn indent<S: AsRef<str>>(lines: &[S], row: usize) -> usize {
    lines.get(row).map_or(0, |line| {
        line.as_ref()
            .chars()
            .take_while(|c| c.is_whitespace())
            .count()
    })
}

fn line_len<S: AsRef<str>>(lines: &[S], row: usize) -> usize {
    lines.get(row).map_or(0, |line| line.as_ref().chars().count())
}

fn clamp<S: AsRef<str>>(lines: &[S], row: usize, column: usize) -> Position {
    if lines.is_empty() {
        return Position::new(0, 0);
    }
    let row = row.min(lines.len() - 1);
    Position::new(row, column.min(line_len(lines, row)))
}
