// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::filtering::models::SkipReasons;
use crate::domain::shared::models::{Identity, RelationType, RunId, UserId};

use super::BlockRunError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub blocked: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Created,
    Running,
    Paused { until: DateTime<Utc> },
    Completed,
    Aborted,
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Completed | RunPhase::Aborted)
    }
}

/// Everything needed to continue a run after its rate-limit cooldown.
#[derive(Debug, Clone, PartialEq)]
pub struct PausedRun {
    pub run_id: RunId,
    pub actor: UserId,
    pub relation: RelationType,
    /// The unconsumed tail of the work list, starting with the target that was rate limited.
    pub remaining: Vec<Identity>,
    /// Cumulative counters at the time of the pause.
    pub counters: RunCounters,
    pub total: u64,
    pub skip_reasons: SkipReasons,
    pub reset_at: DateTime<Utc>,
}

/// State of one invocation of the executor against a work list.
///
/// `cursor` counts the targets the executor has moved past, blocked or failed. Counters are
/// cumulative over the whole run, the part contributed by this invocation never exceeds
/// `cursor`, which in turn never exceeds the length of the work list.
#[derive(Debug, Clone)]
pub struct RunState {
    pub run_id: RunId,
    pub actor: UserId,
    pub relation: RelationType,
    work_list: Vec<Identity>,
    cursor: usize,
    base: RunCounters,
    counters: RunCounters,
    total: u64,
    skip_reasons: SkipReasons,
    phase: RunPhase,
}

impl RunState {
    /// Creates the state for a fresh run, rejecting work lists longer than `max_len`.
    pub fn new(
        run_id: RunId,
        actor: UserId,
        relation: RelationType,
        work_list: Vec<Identity>,
        skip_reasons: SkipReasons,
        max_len: usize,
    ) -> Result<Self, BlockRunError> {
        if work_list.len() > max_len {
            return Err(BlockRunError::WorkListTooLarge {
                len: work_list.len(),
                max: max_len,
            });
        }

        Ok(Self {
            run_id,
            actor,
            relation,
            total: work_list.len() as u64,
            work_list,
            cursor: 0,
            base: RunCounters::default(),
            counters: RunCounters::default(),
            skip_reasons,
            phase: RunPhase::Created,
        })
    }

    /// Continues a paused run. The remaining targets become the new work list and the
    /// counters reached before the pause are carried forward.
    pub fn resume(paused: PausedRun) -> Self {
        Self {
            run_id: paused.run_id,
            actor: paused.actor,
            relation: paused.relation,
            work_list: paused.remaining,
            cursor: 0,
            base: paused.counters,
            counters: paused.counters,
            total: paused.total,
            skip_reasons: paused.skip_reasons,
            phase: RunPhase::Created,
        }
    }

    /// Overrides the total reported in events, e.g. when the work list is the tail of a
    /// larger run.
    pub fn with_progress(mut self, base: RunCounters, total: u64) -> Self {
        self.base = base;
        self.counters = base;
        self.total = total.max(base.blocked + base.failed + self.work_list.len() as u64);
        self
    }
}

impl RunState {
    pub fn work_list(&self) -> &[Identity] {
        &self.work_list
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> &[Identity] {
        &self.work_list[self.cursor..]
    }

    pub fn next_target(&self) -> Option<&Identity> {
        self.work_list.get(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.work_list.len()
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn skip_reasons(&self) -> SkipReasons {
        self.skip_reasons
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }
}

impl RunState {
    pub(crate) fn mark_running(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = RunPhase::Running;
        }
    }

    pub(crate) fn record_blocked(&mut self) {
        self.counters.blocked += 1;
        self.advance();
    }

    pub(crate) fn record_failed(&mut self) {
        self.counters.failed += 1;
        self.advance();
    }

    /// Applies cumulative counters reported by a remote executor. The cursor follows the
    /// number of targets processed since the start of this invocation.
    pub(crate) fn record_remote_progress(&mut self, counters: RunCounters) {
        let processed = (counters.blocked.saturating_sub(self.base.blocked)
            + counters.failed.saturating_sub(self.base.failed)) as usize;

        if processed > self.work_list.len() || processed < self.cursor {
            return;
        }

        self.counters = counters;
        self.cursor = processed;
        self.debug_check_invariant();
    }

    /// Moves the cursor so that exactly `remaining` targets are left.
    pub(crate) fn rewind_to_remaining(&mut self, remaining: usize) {
        self.cursor = self.work_list.len().saturating_sub(remaining).max(self.processed());
    }

    pub(crate) fn pause(&mut self, until: DateTime<Utc>) -> PausedRun {
        self.phase = RunPhase::Paused { until };

        PausedRun {
            run_id: self.run_id.clone(),
            actor: self.actor.clone(),
            relation: self.relation,
            remaining: self.remaining().to_vec(),
            counters: self.counters,
            total: self.total,
            skip_reasons: self.skip_reasons,
            reset_at: until,
        }
    }

    pub(crate) fn complete(&mut self) {
        self.cursor = self.work_list.len();
        self.phase = RunPhase::Completed;
    }

    pub(crate) fn abort(&mut self) {
        self.phase = RunPhase::Aborted;
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.debug_check_invariant();
    }

    fn processed(&self) -> usize {
        (self.counters.blocked - self.base.blocked + self.counters.failed - self.base.failed)
            as usize
    }

    fn debug_check_invariant(&self) {
        debug_assert!(self.processed() <= self.cursor);
        debug_assert!(self.cursor <= self.work_list.len());
    }
}
