//! Rebuilding both versions of a file from a patch that covers all of it.
//!
//! A patch generated with at least as much context as the file has lines is
//! a complete record of both versions. Storing only that patch is enough to
//! show the change side by side later.

use crate::error::{PatchError, PatchResult};
use crate::model::{HunkLine, Patch};
use crate::text::Document;

/// Old and new text recovered from a full patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Versions {
    pub old: String,
    pub new: String,
}

/// Parse `patch_text` and rebuild both versions from it.
pub fn reconstruct_text(patch_text: &str) -> PatchResult<Versions> {
    reconstruct(&Patch::parse(patch_text)?)
}

/// Rebuild both versions from a patch whose hunks cover the whole file
/// without gaps.
pub fn reconstruct(patch: &Patch) -> PatchResult<Versions> {
    if patch.hunks.is_empty() {
        return Err(PatchError::IncompletePatch("patch has no hunks".into()));
    }

    let mut old = Document::empty();
    let mut new = Document::empty();

    for (index, hunk) in patch.hunks.iter().enumerate() {
        if hunk.old_offset() != old.lines.len() || hunk.new_offset() != new.lines.len() {
            return Err(PatchError::IncompletePatch(format!(
                "hunk {} starts at old line {} / new line {}, expected {} / {}",
                index + 1,
                hunk.old_offset() + 1,
                hunk.new_offset() + 1,
                old.lines.len() + 1,
                new.lines.len() + 1
            )));
        }

        for line in &hunk.lines {
            match line {
                HunkLine::Context(text) => {
                    old.lines.push(text.clone());
                    new.lines.push(text.clone());
                }
                HunkLine::Removed(text) => old.lines.push(text.clone()),
                HunkLine::Added(text) => new.lines.push(text.clone()),
                HunkLine::NoNewline => {}
            }
        }
        if hunk.old_missing_newline() {
            old.trailing_newline = false;
        }
        if hunk.new_missing_newline() {
            new.trailing_newline = false;
        }
    }

    Ok(Versions {
        old: old.to_text(),
        new: new.to_text(),
    })
}
