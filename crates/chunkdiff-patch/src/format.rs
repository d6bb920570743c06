//! Rendering a chunk list as a unified patch.
//!
//! Chunks index editor line arrays, where a text ending in a newline has a
//! trailing empty element. Unified patches index newline-terminated lines
//! instead and flag a missing final newline with a marker line. The
//! formatter therefore expands the chunks into a per-line alignment, drops
//! the trailing empty elements, and re-checks every pair the chunks call
//! unchanged before grouping changes into hunks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use chunkdiff_types::{validate_chunks, Chunk};

use crate::error::{PatchError, PatchResult};
use crate::model::{Hunk, HunkLine, Patch};
use crate::text::Document;

/// Patch rendering settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchOptions {
    /// Unchanged lines shown around each change.
    pub context_lines: usize,
}

impl PatchOptions {
    pub fn with_context(context_lines: usize) -> Self {
        Self { context_lines }
    }
}

/// Alignment of one old line, one new line, or a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Equal(usize, usize),
    Delete(usize),
    Insert(usize),
}

impl Op {
    fn is_equal(self) -> bool {
        matches!(self, Op::Equal(..))
    }

    fn consumes(self) -> (usize, usize) {
        match self {
            Op::Equal(..) => (1, 1),
            Op::Delete(_) => (1, 0),
            Op::Insert(_) => (0, 1),
        }
    }
}

/// Build the patch that turns `old` into `new`, given the chunks between
/// them.
///
/// Identical documents give a patch without hunks, which renders as the
/// empty string.
pub fn format_patch<S: AsRef<str>>(
    old: &[S],
    new: &[S],
    chunks: &[Chunk],
    file_name: &str,
    options: &PatchOptions,
) -> PatchResult<Patch> {
    let ops = expand(chunks, old.len(), new.len())?;

    let old_doc = Document::from_lines(old);
    let new_doc = Document::from_lines(new);
    let ops = drop_final_empty(ops, old_doc.lines.len(), old.len(), new_doc.lines.len(), new.len());
    let ops = regroup(verify_pairs(ops, &old_doc, &new_doc));

    let hunks = build_hunks(&ops, &old_doc, &new_doc, options.context_lines);
    debug!(
        file = file_name,
        chunks = chunks.len(),
        hunks = hunks.len(),
        context = options.context_lines,
        "formatted patch"
    );

    Ok(Patch {
        old_path: Some(file_name.to_string()),
        new_path: Some(file_name.to_string()),
        hunks,
    })
}

/// [`format_patch`] rendered to text.
pub fn create_patch<S: AsRef<str>>(
    old: &[S],
    new: &[S],
    chunks: &[Chunk],
    file_name: &str,
    options: &PatchOptions,
) -> PatchResult<String> {
    format_patch(old, new, chunks, file_name, options).map(|patch| patch.to_string())
}

fn expand(chunks: &[Chunk], old_len: usize, new_len: usize) -> PatchResult<Vec<Op>> {
    validate_chunks(chunks)?;

    let mut ops = Vec::with_capacity(old_len.max(new_len));
    let (mut o, mut n) = (0, 0);
    for chunk in chunks {
        if chunk.old.end > old_len || chunk.new.end > new_len {
            return Err(PatchError::InconsistentChunks(format!(
                "chunk {} / {} exceeds documents of {old_len} / {new_len} lines",
                chunk.old, chunk.new
            )));
        }
        while o < chunk.old.start {
            ops.push(Op::Equal(o, n));
            o += 1;
            n += 1;
        }
        ops.extend(chunk.old.as_range().map(Op::Delete));
        ops.extend(chunk.new.as_range().map(Op::Insert));
        o = chunk.old.end;
        n = chunk.new.end;
    }

    if old_len - o != new_len - n {
        return Err(PatchError::InconsistentChunks(format!(
            "unchanged tail is {} old lines but {} new lines",
            old_len - o,
            new_len - n
        )));
    }
    while o < old_len {
        ops.push(Op::Equal(o, n));
        o += 1;
        n += 1;
    }
    Ok(ops)
}

/// Remove the trailing empty element of each line array that has one.
///
/// When `content < raw` the element at `content` is that empty element.
fn drop_final_empty(
    ops: Vec<Op>,
    old_content: usize,
    old_raw: usize,
    new_content: usize,
    new_raw: usize,
) -> Vec<Op> {
    let old_extra = (old_content < old_raw).then_some(old_content);
    let new_extra = (new_content < new_raw).then_some(new_content);

    ops.into_iter()
        .filter_map(|op| match op {
            Op::Equal(o, n) => match (Some(o) == old_extra, Some(n) == new_extra) {
                (true, true) => None,
                (true, false) => Some(Op::Insert(n)),
                (false, true) => Some(Op::Delete(o)),
                (false, false) => Some(op),
            },
            Op::Delete(o) if Some(o) == old_extra => None,
            Op::Insert(n) if Some(n) == new_extra => None,
            _ => Some(op),
        })
        .collect()
}

/// Split pairs that are not textually identical, counting the final newline
/// as part of the line.
fn verify_pairs(ops: Vec<Op>, old: &Document, new: &Document) -> Vec<Op> {
    let mut out = Vec::with_capacity(ops.len());
    for op in ops {
        match op {
            Op::Equal(o, n)
                if old.lines[o] != new.lines[n] || old.has_newline(o) != new.has_newline(n) =>
            {
                out.push(Op::Delete(o));
                out.push(Op::Insert(n));
            }
            _ => out.push(op),
        }
    }
    out
}

/// Within each run of changes, put removed lines before added lines.
fn regroup(ops: Vec<Op>) -> Vec<Op> {
    let mut out = Vec::with_capacity(ops.len());
    let mut inserts = Vec::new();
    for op in ops {
        match op {
            Op::Equal(..) => {
                out.append(&mut inserts);
                out.push(op);
            }
            Op::Delete(_) => out.push(op),
            Op::Insert(_) => inserts.push(op),
        }
    }
    out.append(&mut inserts);
    out
}

fn build_hunks(ops: &[Op], old: &Document, new: &Document, context: usize) -> Vec<Hunk> {
    // Lines consumed on each side before each op.
    let mut positions = Vec::with_capacity(ops.len() + 1);
    let (mut o, mut n) = (0, 0);
    for op in ops {
        positions.push((o, n));
        let (old_used, new_used) = op.consumes();
        o += old_used;
        n += new_used;
    }
    positions.push((o, n));

    let mut groups: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < ops.len() {
        if ops[i].is_equal() {
            i += 1;
            continue;
        }
        let start = i;
        while i < ops.len() && !ops[i].is_equal() {
            i += 1;
        }
        match groups.last_mut() {
            Some(last) if start - last.1 <= 2 * context => last.1 = i,
            _ => groups.push((start, i)),
        }
    }

    groups
        .into_iter()
        .map(|(start, end)| {
            let lo = start - context.min(start);
            let hi = (end + context).min(ops.len());
            hunk(&ops[lo..hi], positions[lo], positions[hi], old, new)
        })
        .collect()
}

fn hunk(
    ops: &[Op],
    (old_from, new_from): (usize, usize),
    (old_to, new_to): (usize, usize),
    old: &Document,
    new: &Document,
) -> Hunk {
    let mut lines = Vec::with_capacity(ops.len());
    for &op in ops {
        match op {
            Op::Equal(o, _) => {
                lines.push(HunkLine::Context(old.lines[o].clone()));
                if !old.has_newline(o) {
                    lines.push(HunkLine::NoNewline);
                }
            }
            Op::Delete(o) => {
                lines.push(HunkLine::Removed(old.lines[o].clone()));
                if !old.has_newline(o) {
                    lines.push(HunkLine::NoNewline);
                }
            }
            Op::Insert(n) => {
                lines.push(HunkLine::Added(new.lines[n].clone()));
                if !new.has_newline(n) {
                    lines.push(HunkLine::NoNewline);
                }
            }
        }
    }

    let old_count = old_to - old_from;
    let new_count = new_to - new_from;
    Hunk {
        old_start: header_start(old_from, old_count),
        old_count,
        new_start: header_start(new_from, new_count),
        new_count,
        lines,
    }
}

fn header_start(offset: usize, count: usize) -> usize {
    if count == 0 {
        offset
    } else {
        offset + 1
    }
}
