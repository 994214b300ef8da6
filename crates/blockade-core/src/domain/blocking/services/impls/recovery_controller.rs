// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use blockade_wasm_utils::sleep;

use crate::app::deps::DynTimeProvider;
use crate::domain::blocking::models::PausedRun;

#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryState {
    Idle,
    CountingDown { paused: PausedRun },
    Resuming,
}

/// Result of checking a paused run against the clock.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Nothing is paused.
    Idle,
    Waiting { remaining: Duration },
    /// The cooldown elapsed. The caller re-invokes the executor with the paused run.
    Resume(PausedRun),
}

/// Waits out rate-limit cooldowns and hands the paused run back once it may continue.
pub struct RecoveryController {
    time_provider: DynTimeProvider,
    tick_interval: Duration,
    state: RecoveryState,
}

impl RecoveryController {
    pub fn new(time_provider: DynTimeProvider, tick_interval: Duration) -> Self {
        Self {
            time_provider,
            tick_interval: tick_interval.max(Duration::from_millis(1)),
            state: RecoveryState::Idle,
        }
    }

    pub fn state(&self) -> &RecoveryState {
        &self.state
    }

    pub fn on_rate_limit(&mut self, paused: PausedRun) {
        info!(
            "Run {} is rate limited until {}. {} target(s) remaining.",
            paused.run_id,
            paused.reset_at,
            paused.remaining.len()
        );
        self.state = RecoveryState::CountingDown { paused };
    }

    pub fn tick(&mut self) -> Tick {
        let RecoveryState::CountingDown { paused } = &self.state else {
            return Tick::Idle;
        };

        let remaining = (paused.reset_at - self.time_provider.now())
            .to_std()
            .unwrap_or(Duration::ZERO);

        if !remaining.is_zero() {
            return Tick::Waiting { remaining };
        }

        match std::mem::replace(&mut self.state, RecoveryState::Idle) {
            RecoveryState::CountingDown { paused } if paused.remaining.is_empty() => {
                info!(
                    "Cooldown of run {} elapsed with nothing left to block.",
                    paused.run_id
                );
                Tick::Idle
            }
            RecoveryState::CountingDown { paused } => {
                info!(
                    "Cooldown of run {} elapsed. Resuming with {} target(s).",
                    paused.run_id,
                    paused.remaining.len()
                );
                self.state = RecoveryState::Resuming;
                Tick::Resume(paused)
            }
            state => {
                self.state = state;
                Tick::Idle
            }
        }
    }

    /// Marks the executor as re-invoked.
    pub fn finish_resume(&mut self) {
        if self.state == RecoveryState::Resuming {
            self.state = RecoveryState::Idle;
        }
    }

    pub fn cancel(&mut self) {
        if self.state != RecoveryState::Idle {
            info!("Cancelling rate limit recovery.");
        }
        self.state = RecoveryState::Idle;
    }

    /// Ticks until the cooldown elapsed. Returns `None` if the run was cancelled in the
    /// meantime or if nothing is left to resume.
    pub async fn wait_for_resume(&mut self, cancel: &CancellationToken) -> Option<PausedRun> {
        loop {
            if cancel.is_cancelled() {
                self.cancel();
                return None;
            }

            let remaining = match self.tick() {
                Tick::Idle => return None,
                Tick::Resume(paused) => return Some(paused),
                Tick::Waiting { remaining } => remaining,
            };

            debug!("Resuming in {}s.", remaining.as_secs());

            tokio::select! {
                _ = cancel.cancelled() => {
                    self.cancel();
                    return None;
                }
                _ = sleep(remaining.min(self.tick_interval)) => {}
            }
        }
    }
}
