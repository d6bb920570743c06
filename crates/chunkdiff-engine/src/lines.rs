//! Line-level diffing and chunk construction.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use chunkdiff_types::{Chunk, LineRange};

use crate::budget::Budget;
use crate::chars::char_changes;
use crate::cleanup::slide_edits;
use crate::interner::LineInterner;
use crate::options::DiffOptions;
use crate::script::{edit_script, normalize, pad, RunTag};

/// Result of a line diff.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiff {
    /// Ordered, non-overlapping chunks.
    pub chunks: Vec<Chunk>,
    /// A deadline-aware pass (the line script or a character refinement)
    /// finished past the time budget, so its output may have been cut short.
    /// Chunks are still valid but may be coarser than a minimal diff.
    pub timed_out: bool,
    /// More chunks than `DiffOptions::max_diffs` allows. Callers typically
    /// skip decoration; the list is still complete.
    pub exceeds_limit: bool,
}

impl LineDiff {
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Rows present only in the new version.
    pub fn additions(&self) -> usize {
        self.chunks.iter().map(|c| c.new.len()).sum()
    }

    /// Rows present only in the old version.
    pub fn deletions(&self) -> usize {
        self.chunks.iter().map(|c| c.old.len()).sum()
    }

    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }
}

/// Compute the chunks that turn `old` into `new`.
///
/// Lines are compared whole (or trimmed, with `ignore_trim_whitespace`).
/// Modified chunks carry character changes in document coordinates when
/// `compute_char_changes` is set.
pub fn diff_lines<S: AsRef<str>>(old: &[S], new: &[S], options: &DiffOptions) -> LineDiff {
    let budget = Budget::start(options.max_computation_time_ms);

    let mut interner = LineInterner::new(options.ignore_trim_whitespace);
    let old_codes = interner.intern_all(old);
    let new_codes = interner.intern_all(new);

    let runs = normalize(edit_script(&old_codes, &new_codes, budget.deadline()));
    let mut timed_out = budget.is_exhausted();
    let mut runs = pad(runs, old.len(), new.len());
    slide_edits(&mut runs, &old_codes, &new_codes, old, new);
    let runs = normalize(runs);

    let mut chunks = Vec::new();
    for run in runs.iter().filter(|r| !r.is_equal()) {
        let old_range = LineRange::from(run.old.clone());
        let new_range = LineRange::from(run.new.clone());

        if run.tag != RunTag::Replace || !options.compute_char_changes {
            chunks.push(Chunk::new(old_range, new_range));
            continue;
        }

        let old_text = join(&old[run.old.clone()]);
        let new_text = join(&new[run.new.clone()]);
        let changes = char_changes(
            &old_text,
            &new_text,
            budget.deadline(),
            options.ignore_trim_whitespace,
        )
        .into_iter()
        .map(|mut change| {
            change.old = change.old.offset_rows(run.old.start);
            change.new = change.new.offset_rows(run.new.start);
            change
        })
        .collect();
        timed_out |= budget.is_exhausted();
        chunks.push(Chunk::with_char_changes(old_range, new_range, changes));
    }

    if timed_out {
        warn!(
            budget_ms = options.max_computation_time_ms,
            chunks = chunks.len(),
            "diff budget exhausted, returning coarse result"
        );
    }
    let exceeds_limit = options.max_diffs.is_some_and(|max| chunks.len() > max);

    debug!(
        old_lines = old.len(),
        new_lines = new.len(),
        distinct = interner.len(),
        chunks = chunks.len(),
        exceeds_limit,
        "computed line diff"
    );

    LineDiff {
        chunks,
        timed_out,
        exceeds_limit,
    }
}

fn join<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkdiff_types::{validate_chunks, ChunkKind, TextRange};
    use proptest::prelude::*;

    fn diff(old: &[&str], new: &[&str]) -> LineDiff {
        diff_lines(old, new, &DiffOptions::default())
    }

    #[test]
    fn modified_line_gets_char_change() {
        let result = diff(&["a", "b", "c"], &["a", "x", "c"]);
        assert_eq!(result.len(), 1);
        let chunk = &result.chunks[0];
        assert_eq!(chunk.kind(), ChunkKind::Modify);
        assert_eq!(chunk.old, LineRange::new(1, 2));
        assert_eq!(chunk.new, LineRange::new(1, 2));
        assert_eq!(chunk.char_changes().len(), 1);
        assert_eq!(chunk.char_changes()[0].old, TextRange::from_coords(1, 0, 1, 1));
        assert_eq!(chunk.char_changes()[0].new, TextRange::from_coords(1, 0, 1, 1));
    }

    #[test]
    fn appended_line_is_insert() {
        let result = diff(&["a", "b"], &["a", "b", "c"]);
        assert_eq!(result.len(), 1);
        let chunk = &result.chunks[0];
        assert_eq!(chunk.kind(), ChunkKind::Insert);
        assert_eq!(chunk.old, LineRange::new(2, 2));
        assert_eq!(chunk.new, LineRange::new(2, 3));
        assert!(chunk.char_changes.is_none());
        assert_eq!(result.additions(), 1);
        assert_eq!(result.deletions(), 0);
    }

    #[test]
    fn identical_inputs_have_no_chunks() {
        assert!(diff(&["x", "y", "x"], &["x", "y", "x"]).is_empty());
        assert!(diff(&[], &[]).is_empty());
        assert!(diff(&[""], &[""]).is_empty());
    }

    #[test]
    fn whitespace_option() {
        let old = ["fn main() {", "  body();", "}"];
        let new = ["fn main() {", "    body();  ", "}"];
        let strict = diff_lines(&old, &new, &DiffOptions::default());
        assert_eq!(strict.len(), 1);
        let relaxed = diff_lines(&old, &new, &DiffOptions::interactive());
        assert!(relaxed.is_empty());
    }

    #[test]
    fn whitespace_option_keeps_real_changes() {
        let old = ["  a", "b"];
        let new = ["a ", "c"];
        let result = diff_lines(&old, &new, &DiffOptions::interactive());
        assert_eq!(result.len(), 1);
        assert_eq!(result.chunks[0].old, LineRange::new(1, 2));
    }

    #[test]
    fn char_changes_can_be_disabled() {
        let options = DiffOptions::default().compute_char_changes(false);
        let result = diff_lines(&["a"], &["b"], &options);
        assert_eq!(result.len(), 1);
        assert!(result.chunks[0].char_changes.is_none());
    }

    #[test]
    fn multi_line_modify_uses_document_rows() {
        let old = ["keep", "alpha", "beta", "keep"];
        let new = ["keep", "alpha", "gamma", "delta", "keep"];
        let result = diff(&old, &new);
        assert_eq!(result.len(), 1);
        for change in result.chunks[0].char_changes() {
            assert!(change.old.start.row >= 2);
            assert!(change.new.start.row >= 2);
        }
    }

    #[test]
    fn oversized_result_is_flagged_not_truncated() {
        let old = ["a", "x", "b", "x", "c"];
        let new = ["A", "x", "B", "x", "C"];
        let options = DiffOptions::default().max_diffs(Some(2));
        let result = diff_lines(&old, &new, &options);
        assert_eq!(result.len(), 3);
        assert!(result.exceeds_limit);

        let unlimited = DiffOptions::default().max_diffs(None);
        assert!(!diff_lines(&old, &new, &unlimited).exceeds_limit);
    }

    #[test]
    fn inserted_function_aligns_on_blank_line() {
        let old = ["fn a() {", "}", "", "fn c() {", "}"];
        let new = ["fn a() {", "}", "", "fn b() {", "}", "", "fn c() {", "}"];
        let result = diff(&old, &new);
        assert_eq!(result.len(), 1);
        assert_eq!(result.chunks[0].new, LineRange::new(3, 6));
    }

    #[test]
    fn leading_delete_with_repeated_line() {
        let old = ["a", "c", "a"];
        let new = ["c", "c", "a"];
        let result = diff(&old, &new);
        assert_eq!(validate_chunks(&result.chunks), Ok(()));
        assert_eq!(result.len(), 1);
        assert_eq!(result.deletions(), 1);
        assert_eq!(result.additions(), 1);
        assert_gaps_match(&old, &new, &result.chunks);
    }

    #[test]
    fn exhausted_budget_still_gives_valid_chunks() {
        // Deterministic pseudo-random lines, enough that Myers cannot finish
        // within a millisecond.
        let mut seed = 0x2545_f491_u64;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            format!("line {}", (seed >> 33) % 40)
        };
        let old: Vec<String> = (0..30_000).map(|_| next()).collect();
        let new: Vec<String> = (0..30_000).map(|_| next()).collect();

        let options = DiffOptions::default().max_computation_time_ms(1);
        let result = diff_lines(&old, &new, &options);
        assert!(result.timed_out);
        assert!(!result.is_empty());
        assert_eq!(validate_chunks(&result.chunks), Ok(()));
        assert_gaps_match(&old, &new, &result.chunks);
    }

    #[test]
    fn unbounded_budget_never_times_out() {
        assert!(!diff(&["a", "b"], &["b", "a"]).timed_out);
    }

    #[test]
    fn serializes_to_json() {
        let result = diff(&["a"], &["a", "b"]);
        let json = serde_json::to_string(&result).unwrap();
        let back: LineDiff = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    /// Unchanged gaps are line-identical, so chunks plus gaps cover both
    /// sides.
    fn assert_gaps_match<S: AsRef<str> + PartialEq + std::fmt::Debug>(
        old: &[S],
        new: &[S],
        chunks: &[Chunk],
    ) {
        let (mut o, mut n) = (0, 0);
        for chunk in chunks {
            assert_eq!(&old[o..chunk.old.start], &new[n..chunk.new.start]);
            o = chunk.old.end;
            n = chunk.new.end;
        }
        assert_eq!(&old[o..], &new[n..]);
    }

    fn lines() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(prop::sample::select(vec!["", "a", "b", "c", "  a", "{", "}"]), 0..20)
            .prop_map(|v| v.into_iter().map(String::from).collect())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2048))]

        #[test]
        fn same_input_is_empty(old in lines()) {
            prop_assert!(diff_lines(&old, &old, &DiffOptions::default()).is_empty());
        }

        #[test]
        fn chunks_cover_both_sides(old in lines(), new in lines()) {
            let result = diff_lines(&old, &new, &DiffOptions::default());
            prop_assert_eq!(validate_chunks(&result.chunks), Ok(()));

            // Unchanged gaps are line-identical, so chunks plus gaps cover
            // both sides.
            let (mut o, mut n) = (0, 0);
            for chunk in &result.chunks {
                prop_assert_eq!(&old[o..chunk.old.start], &new[n..chunk.new.start]);
                o = chunk.old.end;
                n = chunk.new.end;
            }
            prop_assert_eq!(&old[o..], &new[n..]);
        }

        #[test]
        fn trimmed_chunks_stay_valid(old in lines(), new in lines()) {
            let result = diff_lines(&old, &new, &DiffOptions::interactive());
            prop_assert_eq!(validate_chunks(&result.chunks), Ok(()));

            let (mut o, mut n) = (0, 0);
            for chunk in &result.chunks {
                prop_assert_eq!(chunk.old.start - o, chunk.new.start - n);
                for (a, b) in old[o..chunk.old.start].iter().zip(&new[n..chunk.new.start]) {
                    prop_assert_eq!(a.trim(), b.trim());
                }
                o = chunk.old.end;
                n = chunk.new.end;
            }
            prop_assert_eq!(old.len() - o, new.len() - n);
        }
    }
}
