//! Line-level semantic cleanup.
//!
//! A pure insertion or deletion sitting between equal runs can often slide
//! up or down without changing the edit cost, e.g. when a new function is
//! inserted between two existing ones and the blank separator line could
//! belong to either end. Myers picks one of those placements arbitrarily;
//! this pass scores every valid placement and keeps the one whose edges fall
//! on blank lines or indentation boundaries.

use std::ops::Range;

use crate::script::{Run, RunTag};

/// Slide each pure insert/delete run to its best-scoring position.
///
/// `runs` must be normalized and padded, so edits alternate with equal runs
/// and every edit has an equal neighbour on both sides.
pub(crate) fn slide_edits<S: AsRef<str>>(
    runs: &mut [Run],
    old_codes: &[u32],
    new_codes: &[u32],
    old_lines: &[S],
    new_lines: &[S],
) {
    for i in 1..runs.len().saturating_sub(1) {
        let (codes, lines, span) = match runs[i].tag {
            RunTag::Delete => (old_codes, old_lines, runs[i].old.clone()),
            RunTag::Insert => (new_codes, new_lines, runs[i].new.clone()),
            _ => continue,
        };
        let up_room = runs[i - 1].old.len();
        let down_room = runs[i + 1].old.len();

        let mut up = 0;
        while up < up_room && codes[span.start - up - 1] == codes[span.end - up - 1] {
            up += 1;
        }
        let mut down = 0;
        while down < down_room && codes[span.start + down] == codes[span.end + down] {
            down += 1;
        }
        if up == 0 && down == 0 {
            continue;
        }

        let mut best_shift = 0isize;
        let mut best_score = None;
        for shift in -(up as isize)..=(down as isize) {
            let start = offset(span.start, shift);
            let end = offset(span.end, shift);
            let score = boundary_score(lines, start) + boundary_score(lines, end);
            // Ties go to the placement furthest down.
            if best_score.map_or(true, |best| score >= best) {
                best_score = Some(score);
                best_shift = shift;
            }
        }

        if best_shift != 0 {
            shift_run(runs, i, best_shift);
        }
    }
}

fn offset(at: usize, shift: isize) -> usize {
    (at as isize + shift) as usize
}

fn shift_range(range: &mut Range<usize>, shift: isize) {
    range.start = offset(range.start, shift);
    range.end = offset(range.end, shift);
}

fn shift_run(runs: &mut [Run], i: usize, shift: isize) {
    shift_range(&mut runs[i].old, shift);
    shift_range(&mut runs[i].new, shift);

    let before = &mut runs[i - 1];
    before.old.end = offset(before.old.end, shift);
    before.new.end = offset(before.new.end, shift);

    let after = &mut runs[i + 1];
    after.old.start = offset(after.old.start, shift);
    after.new.start = offset(after.new.start, shift);
}

/// How natural a cut between `lines[at - 1]` and `lines[at]` is.
fn boundary_score<S: AsRef<str>>(lines: &[S], at: usize) -> u32 {
    if at == 0 || at >= lines.len() {
        return 6;
    }
    let above = lines[at - 1].as_ref();
    let below = lines[at].as_ref();

    if is_blank(above) {
        5
    } else if is_blank(below) {
        3
    } else {
        match indent(below).cmp(&indent(above)) {
            std::cmp::Ordering::Less => 2,
            std::cmp::Ordering::Equal => 1,
            std::cmp::Ordering::Greater => 0,
        }
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn indent(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interner::LineInterner;
    use crate::script::{edit_script, normalize, pad};

    fn cleaned(old: &[&str], new: &[&str]) -> Vec<Run> {
        let mut interner = LineInterner::new(false);
        let old_codes = interner.intern_all(old);
        let new_codes = interner.intern_all(new);
        let mut runs = pad(
            normalize(edit_script(&old_codes, &new_codes, None)),
            old.len(),
            new.len(),
        );
        slide_edits(&mut runs, &old_codes, &new_codes, old, new);
        normalize(runs)
    }

    fn edits(runs: &[Run]) -> Vec<(Range<usize>, Range<usize>)> {
        runs.iter()
            .filter(|r| !r.is_equal())
            .map(|r| (r.old.clone(), r.new.clone()))
            .collect()
    }

    #[test]
    fn inserted_block_starts_after_blank_line() {
        let old = ["fn a() {", "}", "", "fn c() {", "}"];
        let new = ["fn a() {", "}", "", "fn b() {", "}", "", "fn c() {", "}"];
        let runs = cleaned(&old, &new);
        assert_eq!(edits(&runs), vec![(3..3, 3..6)]);
    }

    #[test]
    fn deleted_block_prefers_blank_boundary() {
        let old = ["x", "", "  y", "", "z"];
        let new = ["x", "", "z"];
        let runs = cleaned(&old, &new);
        assert_eq!(edits(&runs), vec![(2..4, 2..2)]);
    }

    #[test]
    fn unambiguous_edit_is_untouched() {
        let old = ["a", "b", "c"];
        let new = ["a", "c"];
        let runs = cleaned(&old, &new);
        assert_eq!(edits(&runs), vec![(1..2, 1..1)]);
    }

    #[test]
    fn repeated_lines_slide_to_end_on_tie() {
        let old = ["a", "a"];
        let new = ["a", "a", "a"];
        let runs = cleaned(&old, &new);
        assert_eq!(edits(&runs), vec![(2..2, 2..3)]);
    }

    #[test]
    fn score_prefers_file_edges_and_blank_lines() {
        let lines = ["a", "", "  b", "c"];
        assert_eq!(boundary_score(&lines, 0), 6);
        assert_eq!(boundary_score(&lines, 4), 6);
        assert_eq!(boundary_score(&lines, 2), 5);
        assert_eq!(boundary_score(&lines, 1), 3);
        assert_eq!(boundary_score(&lines, 3), 2);
    }
}
