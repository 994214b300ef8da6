// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use super::{PausedRun, RunCounters};

/// How one invocation of an executor ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The work list was exhausted.
    Completed { counters: RunCounters },
    /// The remote API is rate limited. The run continues with `PausedRun::remaining` once
    /// `PausedRun::reset_at` has passed.
    RateLimited(PausedRun),
    /// The run was aborted by an unrecoverable error.
    Failed {
        message: String,
        counters: RunCounters,
    },
    /// The run was cancelled by its owner. No terminal event was emitted.
    Cancelled { counters: RunCounters },
}

impl RunOutcome {
    pub fn counters(&self) -> RunCounters {
        match self {
            RunOutcome::Completed { counters }
            | RunOutcome::Failed { counters, .. }
            | RunOutcome::Cancelled { counters } => *counters,
            RunOutcome::RateLimited(paused) => paused.counters,
        }
    }
}
