//! Character-granularity diffing.

use std::time::Instant;

use chunkdiff_types::{CharChange, Position, TextRange};

use crate::script::{edit_script, RunTag};
use crate::semantic::{cleanup_semantic, Segment, Tag};

/// Diff two strings character by character.
///
/// Coordinates in the result are relative to the given strings: row 0 is the
/// first line of each, columns count `char`s.
pub fn diff_chars(old: &str, new: &str) -> Vec<CharChange> {
    char_changes(old, new, None, false)
}

pub(crate) fn char_changes(
    old: &str,
    new: &str,
    deadline: Option<Instant>,
    skip_whitespace: bool,
) -> Vec<CharChange> {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();

    let mut segments = Vec::new();
    for run in edit_script(&old, &new, deadline) {
        match run.tag {
            RunTag::Equal => segments.push(Segment::new(Tag::Equal, old[run.old].to_vec())),
            RunTag::Delete => segments.push(Segment::new(Tag::Delete, old[run.old].to_vec())),
            RunTag::Insert => segments.push(Segment::new(Tag::Insert, new[run.new].to_vec())),
            RunTag::Replace => {
                segments.push(Segment::new(Tag::Delete, old[run.old].to_vec()));
                segments.push(Segment::new(Tag::Insert, new[run.new].to_vec()));
            }
        }
    }
    cleanup_semantic(&mut segments);

    collect_changes(&segments, skip_whitespace)
}

/// Turn each maximal run of edit segments into one change.
fn collect_changes(segments: &[Segment], skip_whitespace: bool) -> Vec<CharChange> {
    let mut changes = Vec::new();
    let mut old_pos = Position::default();
    let mut new_pos = Position::default();

    let mut i = 0;
    while i < segments.len() {
        if segments[i].tag == Tag::Equal {
            old_pos.advance(&segments[i].text);
            new_pos.advance(&segments[i].text);
            i += 1;
            continue;
        }

        let (old_start, new_start) = (old_pos, new_pos);
        let mut only_whitespace = true;
        while i < segments.len() && segments[i].tag != Tag::Equal {
            let segment = &segments[i];
            only_whitespace &= segment.text.iter().all(|c| c.is_whitespace());
            match segment.tag {
                Tag::Delete => old_pos.advance(&segment.text),
                _ => new_pos.advance(&segment.text),
            }
            i += 1;
        }

        if skip_whitespace && only_whitespace {
            continue;
        }
        changes.push(CharChange::new(
            TextRange::new(old_start, old_pos),
            TextRange::new(new_start, new_pos),
        ));
    }
    changes
}
