// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::filtering::models::SkipReasons;
use crate::domain::shared::models::{RelationType, RunId};

use super::RunCounters;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunTermination {
    Completed,
    Failed { message: String },
    Cancelled,
}

/// Final tally of a run across all of its pauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub run_id: RunId,
    pub relation: RelationType,
    pub blocked: u64,
    pub failed: u64,
    pub skipped: SkipReasons,
    /// Length of the work list, i.e. excluding skipped candidates.
    pub total: u64,
    pub termination: RunTermination,
}

impl RunSummary {
    pub fn new(
        run_id: RunId,
        relation: RelationType,
        counters: RunCounters,
        skipped: SkipReasons,
        total: u64,
        termination: RunTermination,
    ) -> Self {
        Self {
            run_id,
            relation,
            blocked: counters.blocked,
            failed: counters.failed,
            skipped,
            total,
            termination,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.termination == RunTermination::Completed
    }

    /// A sentence suitable for showing to the user, e.g.
    /// "Blocked 3 of 3 followers. Skipped 2 (1 mutual, 1 already blocked)."
    pub fn describe(&self) -> String {
        let mut parts = vec![];

        match &self.termination {
            RunTermination::Completed => {
                parts.push(format!(
                    "Blocked {} of {} {}.",
                    self.blocked, self.total, self.relation
                ));
            }
            RunTermination::Failed { message } => {
                parts.push(format!("The run stopped because of an error: {message}."));
                parts.push(format!(
                    "Blocked {} of {} {} before the error.",
                    self.blocked, self.total, self.relation
                ));
            }
            RunTermination::Cancelled => {
                parts.push(format!(
                    "Cancelled after blocking {} of {} {}.",
                    self.blocked, self.total, self.relation
                ));
            }
        }

        if self.skipped.total() > 0 {
            let reasons = [
                (self.skipped.mutual, "mutual"),
                (self.skipped.already_blocked, "already blocked"),
                (self.skipped.other, "protected"),
            ]
            .into_iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, reason)| format!("{count} {reason}"))
            .join(", ");

            parts.push(format!("Skipped {} ({reasons}).", self.skipped.total()));
        }

        if self.failed > 0 {
            parts.push(format!("{} could not be blocked.", self.failed));
        }

        parts.join(" ")
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}
