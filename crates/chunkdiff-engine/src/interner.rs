//! Per-call line dictionary.
//!
//! Each distinct line (after optional trimming) gets a small integer code so
//! the line diff runs over `u32` sequences. An interner lives for exactly one
//! diff call; codes are meaningless outside it.

use std::collections::HashMap;

pub(crate) struct LineInterner<'a> {
    codes: HashMap<&'a str, u32>,
    trim: bool,
}

impl<'a> LineInterner<'a> {
    pub(crate) fn new(trim: bool) -> Self {
        Self {
            codes: HashMap::new(),
            trim,
        }
    }

    pub(crate) fn intern(&mut self, line: &'a str) -> u32 {
        let key = if self.trim { line.trim() } else { line };
        let next = self.codes.len() as u32;
        *self.codes.entry(key).or_insert(next)
    }

    pub(crate) fn intern_all<S: AsRef<str>>(&mut self, lines: &'a [S]) -> Vec<u32> {
        lines.iter().map(|l| self.intern(l.as_ref())).collect()
    }

    /// Number of distinct lines seen so far.
    pub(crate) fn len(&self) -> usize {
        self.codes.len()
    }
}
