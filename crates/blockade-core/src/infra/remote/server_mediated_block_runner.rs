// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use blockade_proc_macros::DependenciesStruct;

use crate::app::deps::{DynCapabilityProvider, DynExclusionSetsRepository, DynRunTransport};
use crate::domain::blocking::models::{
    BlockRunError, ProgressEvent, RunCounters, RunOutcome, RunState,
};
use crate::domain::blocking::services::{BlockRunner, EventSink};
use crate::infra::events::decode_event;

use super::RemoteRunRequest;

/// Has a trusted backend block the work list and relays the events it streams back.
#[derive(DependenciesStruct)]
pub struct ServerMediatedBlockRunner {
    capability_provider: DynCapabilityProvider,
    exclusion_sets_repo: DynExclusionSetsRepository,
    transport: DynRunTransport,
}

#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
impl BlockRunner for ServerMediatedBlockRunner {
    async fn run(
        &self,
        state: &mut RunState,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> RunOutcome {
        state.mark_running();

        let capability = match self.capability_provider.capability().await {
            Ok(capability) => capability,
            Err(err) => {
                return Self::abort(
                    state,
                    sink,
                    cancel,
                    BlockRunError::Unauthenticated {
                        reason: format!("{err:#}"),
                    }
                    .to_string(),
                )
            }
        };

        info!(
            "Requesting run {} with {} target(s) from the backend.",
            state.run_id,
            state.remaining().len()
        );

        let mut lines = match self
            .transport
            .open_run(&capability, RemoteRunRequest::from(&*state))
            .await
        {
            Ok(lines) => lines,
            Err(err) => {
                return Self::abort(
                    state,
                    sink,
                    cancel,
                    format!("Could not start the blocking run: {err:#}"),
                )
            }
        };

        loop {
            let line = tokio::select! {
                _ = cancel.cancelled() => return Self::cancelled(state),
                line = lines.next() => line,
            };

            let Some(line) = line else {
                break;
            };

            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    return Self::abort(
                        state,
                        sink,
                        cancel,
                        format!("Lost the connection to the backend: {err:#}"),
                    )
                }
            };

            let event = match decode_event(&line) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(err) => {
                    warn!("Skipping unreadable line of run {}. {err:#}", state.run_id);
                    continue;
                }
            };

            if let Some(outcome) = self.apply(state, sink, event).await {
                return outcome;
            }
        }

        Self::abort(
            state,
            sink,
            cancel,
            "The backend closed the connection before the run finished.".to_string(),
        )
    }
}

impl ServerMediatedBlockRunner {
    /// Mirrors a remote event into the local run state and forwards it. Returns the outcome
    /// of the invocation for `rate_limit`, `complete` and `error`.
    async fn apply(
        &self,
        state: &mut RunState,
        sink: &dyn EventSink,
        event: ProgressEvent,
    ) -> Option<RunOutcome> {
        match event {
            ProgressEvent::Status { .. } => {
                sink.emit(event);
                None
            }
            ProgressEvent::Progress {
                blocked, failed, ..
            } => {
                self.track_progress(state, RunCounters { blocked, failed })
                    .await;
                sink.emit(event);
                None
            }
            ProgressEvent::RateLimit {
                blocked,
                failed,
                reset_at,
                remaining,
                ..
            } => {
                self.track_progress(state, RunCounters { blocked, failed })
                    .await;
                state.rewind_to_remaining(remaining as usize);
                let paused = state.pause(reset_at);
                sink.emit(event);
                Some(RunOutcome::RateLimited(paused))
            }
            ProgressEvent::Complete {
                blocked, failed, ..
            } => {
                self.track_progress(state, RunCounters { blocked, failed })
                    .await;
                state.complete();
                sink.emit(event);
                Some(RunOutcome::Completed {
                    counters: state.counters(),
                })
            }
            ProgressEvent::Error {
                ref message,
                blocked,
                failed,
                ..
            } => {
                let message = message.clone();
                state.record_remote_progress(RunCounters { blocked, failed });
                state.abort();
                sink.emit(event);
                Some(RunOutcome::Failed {
                    message,
                    counters: state.counters(),
                })
            }
        }
    }

    /// Applies remote counters. A step of exactly one block identifies the target at the
    /// cursor, which is then added to the session's block list.
    async fn track_progress(&self, state: &mut RunState, counters: RunCounters) {
        let cursor = state.cursor();
        let previous = state.counters();

        state.record_remote_progress(counters);

        let blocked_one = state.cursor() == cursor + 1
            && state.counters().blocked == previous.blocked + 1
            && state.counters().failed == previous.failed;

        if !blocked_one {
            return;
        }

        let Some(target) = state.work_list().get(cursor) else {
            return;
        };

        if let Err(err) = self
            .exclusion_sets_repo
            .insert_blocked(&state.actor, &target.id)
            .await
        {
            warn!(
                "Failed to record {} as blocked in the session cache. {err:#}",
                target.id
            );
        }
    }

    fn abort(
        state: &mut RunState,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
        message: String,
    ) -> RunOutcome {
        if cancel.is_cancelled() {
            return Self::cancelled(state);
        }

        state.abort();
        let counters = state.counters();
        sink.emit(ProgressEvent::error(message.clone(), counters, state.total()));

        RunOutcome::Failed { message, counters }
    }

    fn cancelled(state: &mut RunState) -> RunOutcome {
        info!("Run {} was cancelled.", state.run_id);
        state.abort();
        RunOutcome::Cancelled {
            counters: state.counters(),
        }
    }
}
