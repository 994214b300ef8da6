// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::filtering::models::SkipReasons;

use super::RunCounters;

/// Progress of a run, as seen by its observer.
///
/// All counts are cumulative over the whole run (including time before a pause), so a
/// duplicated event never changes what an observer displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ProgressEvent {
    Status {
        message: String,
    },
    Progress {
        blocked: u64,
        failed: u64,
        total: u64,
    },
    /// The current invocation stopped because the remote API is rate limited. The run
    /// continues automatically at `reset_at` with `remaining` targets left.
    RateLimit {
        blocked: u64,
        failed: u64,
        total: u64,
        #[serde(with = "chrono::serde::ts_seconds")]
        reset_at: DateTime<Utc>,
        remaining: u64,
    },
    Complete {
        blocked: u64,
        failed: u64,
        total: u64,
        skip_reasons: SkipReasons,
    },
    Error {
        message: String,
        blocked: u64,
        failed: u64,
        total: u64,
    },
}

impl ProgressEvent {
    pub fn status(message: impl Into<String>) -> Self {
        ProgressEvent::Status {
            message: message.into(),
        }
    }

    pub fn progress(counters: RunCounters, total: u64) -> Self {
        ProgressEvent::Progress {
            blocked: counters.blocked,
            failed: counters.failed,
            total,
        }
    }

    pub fn complete(counters: RunCounters, total: u64, skip_reasons: SkipReasons) -> Self {
        ProgressEvent::Complete {
            blocked: counters.blocked,
            failed: counters.failed,
            total,
            skip_reasons,
        }
    }

    pub fn error(message: impl Into<String>, counters: RunCounters, total: u64) -> Self {
        ProgressEvent::Error {
            message: message.into(),
            blocked: counters.blocked,
            failed: counters.failed,
            total,
        }
    }

    /// The cumulative counters carried by the event, `None` for `Status`.
    pub fn counters(&self) -> Option<RunCounters> {
        match self {
            ProgressEvent::Status { .. } => None,
            ProgressEvent::Progress {
                blocked, failed, ..
            }
            | ProgressEvent::RateLimit {
                blocked, failed, ..
            }
            | ProgressEvent::Complete {
                blocked, failed, ..
            }
            | ProgressEvent::Error {
                blocked, failed, ..
            } => Some(RunCounters {
                blocked: *blocked,
                failed: *failed,
            }),
        }
    }

    /// `true` for `Complete` and `Error`, after which a run emits nothing else.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProgressEvent::Complete { .. } | ProgressEvent::Error { .. }
        )
    }
}
