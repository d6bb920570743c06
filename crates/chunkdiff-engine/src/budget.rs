//! Cooperative wall-clock budget for one diff computation.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub(crate) struct Budget {
    deadline: Option<Instant>,
}

impl Budget {
    /// Start the clock. A budget of `0` ms never expires.
    pub(crate) fn start(ms: u64) -> Self {
        let deadline = (ms > 0).then(|| Instant::now() + Duration::from_millis(ms));
        Self { deadline }
    }

    /// Deadline handed to the Myers loop, which checks it between passes.
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
