//! In-memory form of a single-file unified patch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The line `diff` writes after a line that has no terminating newline.
pub const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// One line of a hunk body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum HunkLine {
    /// Present in both versions.
    Context(String),
    /// Present only in the old version.
    Removed(String),
    /// Present only in the new version.
    Added(String),
    /// The preceding line has no terminating newline.
    NoNewline,
}

/// One `@@ ... @@` section.
///
/// Starts are stored exactly as written in the header: 1-based, except that
/// a side with a count of zero names the line after which the other side's
/// lines go.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<HunkLine>,
}

impl Hunk {
    /// Zero-based index of the first old line the hunk covers.
    pub fn old_offset(&self) -> usize {
        offset(self.old_start, self.old_count)
    }

    /// Zero-based index of the first new line the hunk covers.
    pub fn new_offset(&self) -> usize {
        offset(self.new_start, self.new_count)
    }

    /// Old-side lines: context and removed, in order.
    pub fn old_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            HunkLine::Context(text) | HunkLine::Removed(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// New-side lines: context and added, in order.
    pub fn new_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            HunkLine::Context(text) | HunkLine::Added(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether a marker says the old version's last line lacks a newline.
    pub fn old_missing_newline(&self) -> bool {
        self.marked(|line| matches!(line, HunkLine::Context(_) | HunkLine::Removed(_)))
    }

    /// Whether a marker says the new version's last line lacks a newline.
    pub fn new_missing_newline(&self) -> bool {
        self.marked(|line| matches!(line, HunkLine::Context(_) | HunkLine::Added(_)))
    }

    fn marked(&self, side: impl Fn(&HunkLine) -> bool) -> bool {
        self.lines
            .windows(2)
            .any(|pair| pair[1] == HunkLine::NoNewline && side(&pair[0]))
    }

    pub fn additions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, HunkLine::Added(_)))
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, HunkLine::Removed(_)))
            .count()
    }
}

fn offset(start: usize, count: usize) -> usize {
    if count == 0 {
        start
    } else {
        start.saturating_sub(1)
    }
}

/// A unified patch for one file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub hunks: Vec<Hunk>,
}

impl Patch {
    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    pub fn additions(&self) -> usize {
        self.hunks.iter().map(Hunk::additions).sum()
    }

    pub fn deletions(&self) -> usize {
        self.hunks.iter().map(Hunk::deletions).sum()
    }
}

fn display_path(prefix: &str, path: &str) -> String {
    if path == "/dev/null" {
        path.to_string()
    } else {
        format!("{prefix}{path}")
    }
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )?;
        for line in &self.lines {
            match line {
                HunkLine::Context(text) => writeln!(f, " {text}")?,
                HunkLine::Removed(text) => writeln!(f, "-{text}")?,
                HunkLine::Added(text) => writeln!(f, "+{text}")?,
                HunkLine::NoNewline => writeln!(f, "{NO_NEWLINE_MARKER}")?,
            }
        }
        Ok(())
    }
}

/// Renders the patch text. A patch without hunks renders as the empty
/// string, header included.
impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hunks.is_empty() {
            return Ok(());
        }
        if let (Some(old), Some(new)) = (&self.old_path, &self.new_path) {
            writeln!(
                f,
                "diff --git {} {}",
                display_path("a/", old),
                display_path("b/", new)
            )?;
        }
        if let Some(old) = &self.old_path {
            writeln!(f, "--- {}", display_path("a/", old))?;
        }
        if let Some(new) = &self.new_path {
            writeln!(f, "+++ {}", display_path("b/", new))?;
        }
        for hunk in &self.hunks {
            write!(f, "{hunk}")?;
        }
        Ok(())
    }
}
