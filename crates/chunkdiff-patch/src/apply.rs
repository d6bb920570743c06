//! Strict, all-or-nothing patch application.

use tracing::{debug, warn};

use crate::error::{PatchError, PatchResult};
use crate::model::{Hunk, Patch};
use crate::text::Document;

/// Parse `patch_text` and apply it to `original`.
pub fn apply(original: &str, patch_text: &str) -> PatchResult<String> {
    let patch = Patch::parse(patch_text)?;
    apply_patch(original, &patch)
}

/// Apply a parsed patch to `original`.
///
/// Every hunk is checked against the original before anything is changed:
/// each context and removed line must match exactly at its recorded line,
/// hunks must be ordered and disjoint, and a missing-newline marker on the
/// old side must agree with the original. Any failure leaves no partial
/// result behind.
pub fn apply_patch(original: &str, patch: &Patch) -> PatchResult<String> {
    let mut doc = Document::from_text(original);

    let mut prev_end = 0;
    for (index, hunk) in patch.hunks.iter().enumerate() {
        let number = index + 1;
        let offset = hunk.old_offset();
        if index > 0 && offset < prev_end {
            return Err(PatchError::OverlappingHunks { hunk: number });
        }
        if let Err(err) = verify_hunk(&doc, hunk, number) {
            warn!(hunk = number, error = %err, "patch does not apply");
            return Err(err);
        }
        prev_end = offset + hunk.old_count;
    }

    let old_marked = patch.hunks.iter().any(Hunk::old_missing_newline);
    let new_marked = patch.hunks.iter().any(Hunk::new_missing_newline);

    for hunk in patch.hunks.iter().rev() {
        let offset = hunk.old_offset();
        let replacement: Vec<String> = hunk.new_lines().map(String::from).collect();
        doc.lines.splice(offset..offset + hunk.old_count, replacement);
    }

    if new_marked {
        doc.trailing_newline = false;
    } else if old_marked {
        doc.trailing_newline = true;
    }

    debug!(
        hunks = patch.hunks.len(),
        lines = doc.lines.len(),
        trailing_newline = doc.trailing_newline,
        "applied patch"
    );
    Ok(doc.to_text())
}

fn verify_hunk(doc: &Document, hunk: &Hunk, number: usize) -> PatchResult<()> {
    let offset = hunk.old_offset();
    if offset > doc.lines.len() {
        return Err(PatchError::Mismatch {
            hunk: number,
            line: offset + 1,
            expected: hunk.old_lines().next().unwrap_or_default().to_string(),
            found: None,
        });
    }

    for (i, expected) in hunk.old_lines().enumerate() {
        let found = doc.lines.get(offset + i);
        if found.map(String::as_str) != Some(expected) {
            return Err(PatchError::Mismatch {
                hunk: number,
                line: offset + i + 1,
                expected: expected.to_string(),
                found: found.cloned(),
            });
        }
    }

    let reaches_end = hunk.old_count > 0 && offset + hunk.old_count == doc.lines.len();
    let marked = hunk.old_missing_newline();
    if marked != (reaches_end && !doc.trailing_newline) {
        return Err(PatchError::NewlineMismatch { hunk: number });
    }
    Ok(())
}
