//! Unchanged stretches that a viewer can collapse.

use serde::{Deserialize, Serialize};
use tracing::debug;

use chunkdiff_types::{Chunk, LineRange};

/// When to collapse unchanged lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldOptions {
    /// Unchanged rows left visible next to each change.
    pub context: usize,
    /// Smallest number of rows worth hiding.
    pub min_hidden: usize,
}

impl Default for FoldOptions {
    fn default() -> Self {
        Self {
            context: 2,
            min_hidden: 4,
        }
    }
}

/// Rows to hide, the same length on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnchangedRegion {
    pub old: LineRange,
    pub new: LineRange,
}

impl UnchangedRegion {
    pub fn len(&self) -> usize {
        self.old.len()
    }

    pub fn is_empty(&self) -> bool {
        self.old.is_empty()
    }
}

/// Collapsible regions between chunks and at both ends of the documents.
///
/// Each gap between changes keeps `context` rows visible at either end and
/// is reported only if at least `min_hidden` rows remain to hide.
pub fn unchanged_regions(
    chunks: &[Chunk],
    old_len: usize,
    new_len: usize,
    options: &FoldOptions,
) -> Vec<UnchangedRegion> {
    let mut regions = Vec::new();
    let (mut old_pos, mut new_pos) = (0, 0);

    let ends = chunks
        .iter()
        .map(|c| (c.old, c.new))
        .chain(std::iter::once((
            LineRange::empty_at(old_len),
            LineRange::empty_at(new_len),
        )));
    for (old, new) in ends {
        let gap = new.start.saturating_sub(new_pos);
        let hidden = gap.saturating_sub(2 * options.context);
        if hidden > 0 && hidden >= options.min_hidden {
            let old_from = old_pos + options.context;
            let new_from = new_pos + options.context;
            regions.push(UnchangedRegion {
                old: LineRange::new(old_from, old_from + hidden),
                new: LineRange::new(new_from, new_from + hidden),
            });
        }
        old_pos = old.end;
        new_pos = new.end;
    }

    debug!(
        chunks = chunks.len(),
        regions = regions.len(),
        hidden = regions.iter().map(UnchangedRegion::len).sum::<usize>(),
        "computed unchanged regions"
    );
    regions
}
