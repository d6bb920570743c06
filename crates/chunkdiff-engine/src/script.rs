//! Edit scripts as runs over two sequences.

use std::hash::Hash;
use std::ops::Range;
use std::time::Instant;

use similar::{Algorithm, DiffOp, DiffTag};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RunTag {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// One run of an edit script: a stretch of equal elements or an edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Run {
    pub tag: RunTag,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

impl Run {
    pub(crate) fn equal(old: Range<usize>, new: Range<usize>) -> Self {
        Self {
            tag: RunTag::Equal,
            old,
            new,
        }
    }

    pub(crate) fn is_equal(&self) -> bool {
        self.tag == RunTag::Equal
    }

    /// Rebuild `op` at the cursors `(o, n)`. For a pure delete or insert
    /// `similar` reports a placeholder range on the side it doesn't consume,
    /// so only the lengths are taken from it.
    fn from_op(op: &DiffOp, o: usize, n: usize) -> Self {
        let (tag, old, new) = op.as_tag_tuple();
        let (tag, old_len, new_len) = match tag {
            DiffTag::Equal => (RunTag::Equal, old.len(), old.len()),
            DiffTag::Delete => (RunTag::Delete, old.len(), 0),
            DiffTag::Insert => (RunTag::Insert, 0, new.len()),
            DiffTag::Replace => (RunTag::Replace, old.len(), new.len()),
        };
        Self {
            tag,
            old: o..o + old_len,
            new: n..n + new_len,
        }
    }
}

fn edit_tag(old: &Range<usize>, new: &Range<usize>) -> RunTag {
    match (old.is_empty(), new.is_empty()) {
        (true, _) => RunTag::Insert,
        (_, true) => RunTag::Delete,
        _ => RunTag::Replace,
    }
}

/// Myers shortest edit script. Past the deadline `similar` stops refining
/// and reports the remaining region as one replacement.
///
/// Runs are contiguous: each starts where the previous one ended on both
/// sides.
pub(crate) fn edit_script<T: Eq + Hash + Ord>(
    old: &[T],
    new: &[T],
    deadline: Option<Instant>,
) -> Vec<Run> {
    let ops = similar::capture_diff_slices_deadline(Algorithm::Myers, old, new, deadline);
    let (mut o, mut n) = (0, 0);
    let mut runs = Vec::with_capacity(ops.len());
    for op in &ops {
        let run = Run::from_op(op, o, n);
        o = run.old.end;
        n = run.new.end;
        runs.push(run);
    }
    runs
}

/// Drop empty runs and coalesce neighbours, so equal runs and edit runs
/// strictly alternate. Abutting edits collapse into one insert, delete, or
/// replace.
pub(crate) fn normalize(runs: Vec<Run>) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs {
        if run.old.is_empty() && run.new.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.is_equal() == run.is_equal() => {
                last.old.end = run.old.end;
                last.new.end = run.new.end;
                if !last.is_equal() {
                    last.tag = edit_tag(&last.old, &last.new);
                }
            }
            _ => out.push(run),
        }
    }
    out
}

/// Surround the script with (possibly empty) equal runs so every edit has an
/// equal neighbour on both sides.
pub(crate) fn pad(mut runs: Vec<Run>, old_len: usize, new_len: usize) -> Vec<Run> {
    if runs.first().map_or(true, |r| !r.is_equal()) {
        runs.insert(0, Run::equal(0..0, 0..0));
    }
    if runs.last().map_or(true, |r| !r.is_equal()) {
        runs.push(Run::equal(old_len..old_len, new_len..new_len));
    }
    runs
}
