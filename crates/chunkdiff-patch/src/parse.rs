//! Parsing unified patch text.
//!
//! Accepts the output of [`Patch`]'s `Display` impl and of `diff -u` /
//! `git diff` for a single file. Anything before the first hunk header is
//! preamble; only the `---` and `+++` lines are interpreted there.

use tracing::debug;

use crate::error::{PatchError, PatchResult};
use crate::model::{Hunk, HunkLine, Patch};

impl Patch {
    /// Parse single-file unified patch text.
    pub fn parse(text: &str) -> PatchResult<Patch> {
        let lines: Vec<&str> = text.strip_suffix('\n').unwrap_or(text).split('\n').collect();
        let lines: &[&str] = if text.is_empty() { &[] } else { &lines };

        let mut patch = Patch::default();
        let mut i = 0;

        while i < lines.len() && !lines[i].starts_with("@@") {
            if let Some(path) = lines[i].strip_prefix("--- ") {
                patch.old_path = Some(strip_path(path, "a/"));
            } else if let Some(path) = lines[i].strip_prefix("+++ ") {
                patch.new_path = Some(strip_path(path, "b/"));
            }
            i += 1;
        }

        while i < lines.len() {
            let line_no = i + 1;
            let header = lines[i];
            let Some((old_start, old_count, new_start, new_count)) = parse_header(header) else {
                return Err(if header.starts_with("@@") {
                    PatchError::MalformedHeader {
                        line: line_no,
                        text: header.to_string(),
                    }
                } else {
                    PatchError::UnexpectedLine {
                        line: line_no,
                        text: header.to_string(),
                    }
                });
            };
            i += 1;

            let hunk_no = patch.hunks.len() + 1;
            let mut body = Vec::new();
            let (mut old_left, mut new_left) = (old_count, new_count);
            while old_left > 0 || new_left > 0 {
                let Some(&line) = lines.get(i) else {
                    return Err(PatchError::TruncatedHunk {
                        hunk: hunk_no,
                        missing_old: old_left,
                        missing_new: new_left,
                    });
                };
                let unexpected = || PatchError::UnexpectedLine {
                    line: i + 1,
                    text: line.to_string(),
                };

                match line.chars().next() {
                    // Some tools strip the space from blank context lines.
                    None | Some(' ') if old_left > 0 && new_left > 0 => {
                        body.push(HunkLine::Context(line.get(1..).unwrap_or("").to_string()));
                        old_left -= 1;
                        new_left -= 1;
                    }
                    Some('-') if old_left > 0 => {
                        body.push(HunkLine::Removed(line[1..].to_string()));
                        old_left -= 1;
                    }
                    Some('+') if new_left > 0 => {
                        body.push(HunkLine::Added(line[1..].to_string()));
                        new_left -= 1;
                    }
                    Some('\\') if !body.is_empty() => body.push(HunkLine::NoNewline),
                    _ => return Err(unexpected()),
                }
                i += 1;
            }

            if lines.get(i).is_some_and(|l| l.starts_with('\\')) && !body.is_empty() {
                body.push(HunkLine::NoNewline);
                i += 1;
            }

            patch.hunks.push(Hunk {
                old_start,
                old_count,
                new_start,
                new_count,
                lines: body,
            });
        }

        debug!(
            hunks = patch.hunks.len(),
            additions = patch.additions(),
            deletions = patch.deletions(),
            "parsed patch"
        );
        Ok(patch)
    }
}

impl std::str::FromStr for Patch {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Patch::parse(s)
    }
}

fn strip_path(path: &str, prefix: &str) -> String {
    // Timestamps follow a tab in `diff -u` output.
    let path = path.split('\t').next().unwrap_or(path).trim_end();
    path.strip_prefix(prefix).unwrap_or(path).to_string()
}

/// `@@ -s[,c] +s[,c] @@[ section]`
fn parse_header(line: &str) -> Option<(usize, usize, usize, usize)> {
    let rest = line.strip_prefix("@@ -")?;
    let (ranges, _section) = rest.split_once(" @@")?;
    let (old, new) = ranges.split_once(" +")?;
    let (old_start, old_count) = parse_range(old)?;
    let (new_start, new_count) = parse_range(new)?;
    Some((old_start, old_count, new_start, new_count))
}

fn parse_range(range: &str) -> Option<(usize, usize)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formatted_patch() {
        let text = "diff --git a/src/lib.rs b/src/lib.rs\n\
                    index 3b18e51..a0423d1 100644\n\
                    --- a/src/lib.rs\n\
                    +++ b/src/lib.rs\n\
                    @@ -1,3 +1,3 @@ fn main\n \
                    a\n\
                    -b\n\
                    +c\n \
                    d\n";
        let patch = Patch::parse(text).unwrap();
        assert_eq!(patch.old_path.as_deref(), Some("src/lib.rs"));
        assert_eq!(patch.new_path.as_deref(), Some("src/lib.rs"));
        assert_eq!(patch.hunks.len(), 1);
        let hunk = &patch.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_count), (1, 3));
        assert_eq!(
            hunk.lines,
            vec![
                HunkLine::Context("a".into()),
                HunkLine::Removed("b".into()),
                HunkLine::Added("c".into()),
                HunkLine::Context("d".into()),
            ]
        );
    }

    #[test]
    fn display_and_parse_agree() {
        let text = "diff --git a/f b/f\n--- a/f\n+++ b/f\n\
                    @@ -2,1 +2,1 @@\n-b\n\\ No newline at end of file\n+b\n\
                    @@ -9,0 +10,2 @@\n+x\n+y\n";
        let patch = Patch::parse(text).unwrap();
        assert_eq!(patch.hunks.len(), 2);
        assert_eq!(patch.to_string(), text);
    }

    #[test]
    fn omitted_count_means_one() {
        let patch = Patch::parse("@@ -3 +3 @@\n-x\n+y\n").unwrap();
        let hunk = &patch.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count), (3, 1, 3, 1));
        assert!(patch.old_path.is_none());
    }

    #[test]
    fn marker_after_final_body_line() {
        let patch = Patch::parse("@@ -1,1 +1,1 @@\n-a\n+a\n\\ No newline at end of file\n").unwrap();
        assert!(patch.hunks[0].new_missing_newline());
        assert!(!patch.hunks[0].old_missing_newline());
    }

    #[test]
    fn blank_context_line_without_space() {
        let patch = Patch::parse("@@ -1,3 +1,3 @@\n a\n\n-b\n+c\n").unwrap();
        assert_eq!(patch.hunks[0].lines[1], HunkLine::Context(String::new()));
    }

    #[test]
    fn dev_null_and_timestamps() {
        let text = "--- /dev/null\t2024-01-01 00:00:00\n+++ b/new.txt\n@@ -0,0 +1,1 @@\n+hi\n";
        let patch = Patch::parse(text).unwrap();
        assert_eq!(patch.old_path.as_deref(), Some("/dev/null"));
        assert_eq!(patch.new_path.as_deref(), Some("new.txt"));
    }

    #[test]
    fn empty_text_is_empty_patch() {
        assert!(Patch::parse("").unwrap().is_empty());
        assert!(Patch::parse("diff --git a/f b/f\n").unwrap().is_empty());
    }

    #[test]
    fn malformed_headers() {
        for header in ["@@ -a,1 +1,1 @@", "@@ -1,1 +1,1", "@@ 1,1 1,1 @@", "@@ -1,1 @@"] {
            let err = Patch::parse(&format!("{header}\n-x\n+y\n")).unwrap_err();
            assert!(
                matches!(err, PatchError::MalformedHeader { line: 1, .. }),
                "{header}: {err}"
            );
        }
    }

    #[test]
    fn truncated_hunk() {
        let err = Patch::parse("@@ -1,2 +1,2 @@\n a\n").unwrap_err();
        assert_eq!(
            err,
            PatchError::TruncatedHunk {
                hunk: 1,
                missing_old: 1,
                missing_new: 1
            }
        );
    }

    #[test]
    fn stray_lines_are_rejected() {
        let err = Patch::parse("@@ -1,1 +1,1 @@\n-a\n+b\ngarbage\n").unwrap_err();
        assert!(matches!(err, PatchError::UnexpectedLine { line: 4, .. }));

        let err = Patch::parse("@@ -1,1 +1,1 @@\n-a\n-b\n").unwrap_err();
        assert!(matches!(err, PatchError::UnexpectedLine { line: 3, .. }));

        let err = Patch::parse("@@ -1,1 +1,1 @@\n\\ No newline at end of file\n").unwrap_err();
        assert!(matches!(err, PatchError::UnexpectedLine { line: 2, .. }));
    }
}
