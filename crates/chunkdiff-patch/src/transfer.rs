//! Copying one chunk's lines across to the other version.
//!
//! Copying from new to old accepts a single change; copying from old to new
//! reverts it. Both work on editor line arrays.

use tracing::debug;

use chunkdiff_types::{Chunk, LineRange, Side};

use crate::error::{PatchError, PatchResult};

/// Replace the chunk's rows in `target` with its rows from `source`.
///
/// `from` names the side `source` belongs to. Returns the updated target
/// lines and the rows the copied lines now occupy there.
pub fn copy_chunk<S: AsRef<str>>(
    chunk: &Chunk,
    from: Side,
    source: &[S],
    target: &[S],
) -> PatchResult<(Vec<String>, LineRange)> {
    let from_range = chunk.range(from);
    let to_range = chunk.range(from.opposite());
    check_bounds(from, from_range, source.len())?;
    check_bounds(from.opposite(), to_range, target.len())?;

    let mut lines: Vec<String> = target.iter().map(|l| l.as_ref().to_string()).collect();
    let copied = source[from_range.as_range()]
        .iter()
        .map(|l| l.as_ref().to_string());
    lines.splice(to_range.as_range(), copied);

    let placed = LineRange::new(to_range.start, to_range.start + from_range.len());
    debug!(%from, source_rows = %from_range, target_rows = %placed, "copied chunk");
    Ok((lines, placed))
}

fn check_bounds(side: Side, range: LineRange, len: usize) -> PatchResult<()> {
    if range.start > range.end || range.end > len {
        return Err(PatchError::ChunkOutOfBounds { side, range, len });
    }
    Ok(())
}
