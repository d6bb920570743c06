use serde::{Deserialize, Serialize};

/// Configuration for a single diff computation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Compare lines after trimming leading and trailing whitespace.
    /// Output ranges still refer to the original text.
    pub ignore_trim_whitespace: bool,
    /// Wall-clock budget in milliseconds; `0` means unbounded. When the
    /// budget runs out the engine returns a coarser but valid result.
    pub max_computation_time_ms: u64,
    /// Refine modified chunks down to character changes.
    pub compute_char_changes: bool,
    /// Chunk count above which the result is flagged as oversized.
    /// The chunk list itself is never truncated.
    pub max_diffs: Option<usize>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            ignore_trim_whitespace: false,
            max_computation_time_ms: 0,
            compute_char_changes: true,
            max_diffs: Some(5000),
        }
    }
}

impl DiffOptions {
    /// Options matching what an interactive diff view wants: whitespace-only
    /// edits at line ends are not worth a marker.
    pub fn interactive() -> Self {
        Self {
            ignore_trim_whitespace: true,
            ..Default::default()
        }
    }

    pub fn ignore_trim_whitespace(mut self, yes: bool) -> Self {
        self.ignore_trim_whitespace = yes;
        self
    }

    pub fn max_computation_time_ms(mut self, ms: u64) -> Self {
        self.max_computation_time_ms = ms;
        self
    }

    pub fn compute_char_changes(mut self, yes: bool) -> Self {
        self.compute_char_changes = yes;
        self
    }

    pub fn max_diffs(mut self, max: Option<usize>) -> Self {
        self.max_diffs = max;
        self
    }
}
