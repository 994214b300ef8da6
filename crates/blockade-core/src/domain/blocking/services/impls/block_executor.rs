// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use blockade_proc_macros::DependenciesStruct;
use blockade_wasm_utils::sleep;

use crate::app::deps::{
    DynAppContext, DynCapabilityProvider, DynExclusionSetsRepository, DynRelationshipService,
    DynTimeProvider,
};
use crate::domain::blocking::models::{
    BatchBlockOutcome, BlockOutcome, BlockRunError, ProgressEvent, RunOutcome, RunState,
};
use crate::domain::blocking::services::{resume_time, BlockRunner, EventSink};
use crate::domain::session::models::Capability;
use crate::domain::shared::models::{Identity, UserId};

/// Blocks the targets of a work list one after the other, directly against the remote API.
#[derive(DependenciesStruct)]
pub struct BlockExecutor {
    capability_provider: DynCapabilityProvider,
    ctx: DynAppContext,
    exclusion_sets_repo: DynExclusionSetsRepository,
    relationship_service: DynRelationshipService,
    time_provider: DynTimeProvider,
}

/// What happened to a single target.
enum TargetResult {
    Blocked,
    Failed,
    RateLimited { reset_hint: Option<String> },
    Aborted { message: String },
    Cancelled,
}

/// Tells the loop whether to carry on with the next target.
enum Step {
    Continue,
    Finished(RunOutcome),
}

#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
impl BlockRunner for BlockExecutor {
    async fn run(
        &self,
        state: &mut RunState,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> RunOutcome {
        info!(
            "Starting run {} for {} with {} of {} target(s) remaining.",
            state.run_id,
            state.relation,
            state.remaining().len(),
            state.total()
        );
        state.mark_running();

        let mut capability = match self.capability_provider.capability().await {
            Ok(capability) => capability,
            Err(err) => {
                return self.abort(
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

        let outcome = match self.ctx.config.batch_size {
            Some(batch_size) if batch_size > 1 => {
                self.run_batched(state, sink, cancel, &mut capability, batch_size)
                    .await
            }
            _ => self.run_individually(state, sink, cancel, &mut capability).await,
        };

        match &outcome {
            RunOutcome::Completed { counters } => info!(
                "Run {} completed. {} blocked, {} failed.",
                state.run_id, counters.blocked, counters.failed
            ),
            RunOutcome::RateLimited(paused) => info!(
                "Run {} paused until {} with {} target(s) remaining.",
                state.run_id,
                paused.reset_at,
                paused.remaining.len()
            ),
            RunOutcome::Failed { message, .. } => {
                error!("Run {} failed. {message}", state.run_id)
            }
            RunOutcome::Cancelled { .. } => info!("Run {} was cancelled.", state.run_id),
        }

        outcome
    }
}

impl BlockExecutor {
    /// An executor sharing all dependencies of `self` that signs its requests with the
    /// capabilities of `capability_provider`.
    pub(crate) fn with_capability_provider(
        &self,
        capability_provider: DynCapabilityProvider,
    ) -> Self {
        Self {
            capability_provider,
            ctx: self.ctx.clone(),
            exclusion_sets_repo: self.exclusion_sets_repo.clone(),
            relationship_service: self.relationship_service.clone(),
            time_provider: self.time_provider.clone(),
        }
    }
}

impl BlockExecutor {
    async fn run_individually(
        &self,
        state: &mut RunState,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
        capability: &mut Capability,
    ) -> RunOutcome {
        while !state.is_exhausted() {
            if let Step::Finished(outcome) =
                self.process_next_target(state, sink, cancel, capability).await
            {
                return outcome;
            }

            if let Step::Finished(outcome) = self.throttle(state, cancel).await {
                return outcome;
            }
        }

        self.complete(state, sink)
    }

    async fn run_batched(
        &self,
        state: &mut RunState,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
        capability: &mut Capability,
        batch_size: usize,
    ) -> RunOutcome {
        while !state.is_exhausted() {
            if cancel.is_cancelled() {
                return Self::cancelled(state);
            }

            let batch = state
                .remaining()
                .iter()
                .take(batch_size)
                .cloned()
                .collect::<Vec<_>>();
            let ids = batch
                .iter()
                .map(|identity| identity.id.clone())
                .collect::<Vec<_>>();

            let outcome = self
                .relationship_service
                .create_blocks(capability, &state.actor, &ids)
                .await;

            if cancel.is_cancelled() {
                return Self::cancelled(state);
            }

            match outcome {
                BatchBlockOutcome::Blocked => {
                    debug!("Blocked a batch of {} target(s).", batch.len());
                    for target in &batch {
                        self.record_blocked(state, sink, target).await;
                    }
                }
                BatchBlockOutcome::RateLimited { reset_hint } => {
                    return self.pause(state, sink, reset_hint.as_deref());
                }
                BatchBlockOutcome::Failed { message } => {
                    warn!(
                        "Batch of {} target(s) failed ({message}). Blocking its members one by one.",
                        batch.len()
                    );
                    for idx in 0..batch.len() {
                        if idx > 0 {
                            if let Step::Finished(outcome) = self.throttle(state, cancel).await {
                                return outcome;
                            }
                        }
                        if let Step::Finished(outcome) =
                            self.process_next_target(state, sink, cancel, capability).await
                        {
                            return outcome;
                        }
                    }
                }
            }

            if let Step::Finished(outcome) = self.throttle(state, cancel).await {
                return outcome;
            }
        }

        self.complete(state, sink)
    }

    async fn process_next_target(
        &self,
        state: &mut RunState,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
        capability: &mut Capability,
    ) -> Step {
        if cancel.is_cancelled() {
            return Step::Finished(Self::cancelled(state));
        }

        let Some(target) = state.next_target().cloned() else {
            return Step::Continue;
        };

        let actor = state.actor.clone();

        match self
            .block_target(capability, &actor, &target, cancel)
            .await
        {
            TargetResult::Blocked => {
                self.record_blocked(state, sink, &target).await;
                Step::Continue
            }
            TargetResult::Failed => {
                state.record_failed();
                sink.emit(ProgressEvent::progress(state.counters(), state.total()));
                Step::Continue
            }
            TargetResult::RateLimited { reset_hint } => {
                Step::Finished(self.pause(state, sink, reset_hint.as_deref()))
            }
            TargetResult::Aborted { message } => {
                Step::Finished(self.abort(state, sink, cancel, message))
            }
            TargetResult::Cancelled => Step::Finished(Self::cancelled(state)),
        }
    }

    /// Attempts to block a single target within the configured attempt budget.
    ///
    /// A rejected capability is refreshed once per target and the retry with the fresh
    /// capability does not count against the budget.
    async fn block_target(
        &self,
        capability: &mut Capability,
        actor: &UserId,
        target: &Identity,
        cancel: &CancellationToken,
    ) -> TargetResult {
        let config = &self.ctx.config;
        let max_attempts = config.max_attempts.max(1);
        let mut attempts = 0u32;
        let mut refreshed_capability = false;

        loop {
            let outcome = self
                .relationship_service
                .create_block(capability, actor, &target.id)
                .await;

            if cancel.is_cancelled() {
                return TargetResult::Cancelled;
            }

            let backoff: Duration = match outcome {
                BlockOutcome::Blocked => return TargetResult::Blocked,
                BlockOutcome::RateLimited { reset_hint } => {
                    return TargetResult::RateLimited { reset_hint }
                }
                BlockOutcome::AuthExpired if !refreshed_capability => {
                    info!("Capability was rejected while blocking {}. Refreshing.", target.id);
                    refreshed_capability = true;

                    match self.capability_provider.refresh_capability().await {
                        Ok(fresh) => *capability = fresh,
                        Err(err) => {
                            return TargetResult::Aborted {
                                message: BlockRunError::Unauthenticated {
                                    reason: format!("Your session could not be renewed. {err:#}"),
                                }
                                .to_string(),
                            }
                        }
                    }

                    if cancel.is_cancelled() {
                        return TargetResult::Cancelled;
                    }
                    continue;
                }
                BlockOutcome::AuthExpired => {
                    warn!(
                        "Refreshed capability was rejected as well while blocking {}.",
                        target.id
                    );
                    config.retry_backoff
                }
                BlockOutcome::UpstreamUnavailable => {
                    warn!("Upstream unavailable while blocking {}.", target.id);
                    config.upstream_backoff
                }
                BlockOutcome::Failed { status, message } => {
                    warn!(
                        "Failed to block {} (status {:?}): {message}",
                        target.id, status
                    );
                    config.retry_backoff
                }
            };

            attempts += 1;
            if attempts >= max_attempts {
                warn!(
                    "Giving up on {} ({}) after {attempts} attempt(s).",
                    target.id, target.handle
                );
                return TargetResult::Failed;
            }

            debug!(
                "Retrying {} in {:?} (attempt {} of {max_attempts}).",
                target.id,
                backoff,
                attempts + 1
            );
            sleep(backoff).await;

            if cancel.is_cancelled() {
                return TargetResult::Cancelled;
            }
        }
    }

    async fn record_blocked(&self, state: &mut RunState, sink: &dyn EventSink, target: &Identity) {
        state.record_blocked();

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

        sink.emit(ProgressEvent::progress(state.counters(), state.total()));
    }

    async fn throttle(&self, state: &mut RunState, cancel: &CancellationToken) -> Step {
        if state.is_exhausted() {
            return Step::Continue;
        }

        sleep(self.ctx.config.throttle_delay).await;

        if cancel.is_cancelled() {
            return Step::Finished(Self::cancelled(state));
        }
        Step::Continue
    }

    fn pause(
        &self,
        state: &mut RunState,
        sink: &dyn EventSink,
        reset_hint: Option<&str>,
    ) -> RunOutcome {
        let config = &self.ctx.config;
        let reset_at = resume_time(
            reset_hint,
            self.time_provider.now(),
            config.default_cooldown,
            config.max_cooldown,
        );

        let paused = state.pause(reset_at);
        let counters = paused.counters;

        sink.emit(ProgressEvent::RateLimit {
            blocked: counters.blocked,
            failed: counters.failed,
            total: paused.total,
            reset_at,
            remaining: paused.remaining.len() as u64,
        });

        RunOutcome::RateLimited(paused)
    }

    fn complete(&self, state: &mut RunState, sink: &dyn EventSink) -> RunOutcome {
        state.complete();
        let counters = state.counters();

        sink.emit(ProgressEvent::complete(
            counters,
            state.total(),
            state.skip_reasons(),
        ));

        RunOutcome::Completed { counters }
    }

    fn abort(
        &self,
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
        state.abort();
        RunOutcome::Cancelled {
            counters: state.counters(),
        }
    }
}
