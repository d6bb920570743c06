//! Conversions between document text and line arrays.
//!
//! Editors hold a document as `lines` with `text == lines.join("\n")`, so a
//! text ending in a newline has a trailing empty element. Patches instead
//! talk about newline-terminated lines plus a flag for the last one.
//! [`Document`] is the patch-side view.

/// A document as a list of lines plus whether the last one ends in `\n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub lines: Vec<String>,
    pub trailing_newline: bool,
}

impl Document {
    /// Split text into lines. The empty text has no lines.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::empty();
        }
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        Self {
            lines: body.split('\n').map(String::from).collect(),
            trailing_newline,
        }
    }

    /// Read an editor line array (`text == lines.join("\n")`).
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        match lines.split_last() {
            None => Self::empty(),
            Some((last, rest)) if last.as_ref().is_empty() => Self {
                lines: rest.iter().map(|l| l.as_ref().to_string()).collect(),
                trailing_newline: true,
            },
            Some(_) => Self {
                lines: lines.iter().map(|l| l.as_ref().to_string()).collect(),
                trailing_newline: false,
            },
        }
    }

    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            trailing_newline: true,
        }
    }

    pub fn to_text(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }

    /// The editor line array for this document.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = self.lines.clone();
        if self.trailing_newline {
            lines.push(String::new());
        }
        lines
    }

    /// Whether line `index` is followed by a newline.
    pub fn has_newline(&self, index: usize) -> bool {
        index + 1 < self.lines.len() || self.trailing_newline
    }
}

/// Split text into an editor line array.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(String::from).collect()
}
