// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use blockade_proc_macros::InjectDependencies;
use blockade_wasm_utils::spawn;

use crate::app::deps::{
    ActiveRun, DynAppContext, DynBlockRunner, DynDirectoryService, DynEventSink,
    DynExclusionSetsRepository, DynTimeProvider,
};
use crate::domain::blocking::models::{
    BlockRunError, PreparedRun, ProgressEvent, RunCounters, RunOutcome, RunState, RunSummary,
    RunTermination,
};
use crate::domain::blocking::services::impls::{RecoveryController, RunEventSink};
use crate::domain::blocking::services::EventSink;
use crate::domain::directory::services::impls::PaginatedSetFetcher;
use crate::domain::filtering::services::filter_targets;
use crate::domain::shared::models::{RelationType, RunId, UserId};

use super::BlockRunHandle;

#[derive(InjectDependencies, Clone)]
pub struct BulkBlockService {
    #[inject]
    block_runner: DynBlockRunner,
    #[inject]
    ctx: DynAppContext,
    #[inject]
    directory_service: DynDirectoryService,
    #[inject]
    exclusion_sets_repo: DynExclusionSetsRepository,
    #[inject]
    time_provider: DynTimeProvider,
}

impl BulkBlockService {
    /// Enumerates and filters the `relation` of `target` without blocking anyone.
    #[tracing::instrument(skip(self))]
    pub async fn prepare_run(
        &self,
        target: &UserId,
        relation: RelationType,
    ) -> Result<PreparedRun, BlockRunError> {
        self.prepare(RunId::new(), target, relation, None).await
    }

    /// Blocks a previously prepared work list. Rate-limit pauses are waited out, the
    /// returned summary describes the end of the whole run.
    #[tracing::instrument(skip(self, prepared, sink, cancel), fields(run_id = %prepared.run_id))]
    pub async fn execute(
        &self,
        prepared: PreparedRun,
        sink: DynEventSink,
        cancel: CancellationToken,
    ) -> Result<RunSummary, BlockRunError> {
        let run_id = prepared.run_id.clone();
        self.ctx.register_run(ActiveRun {
            run_id: run_id.clone(),
            target: prepared.target.clone(),
            relation: prepared.relation,
            cancel: cancel.clone(),
        });

        let sink = RunEventSink::new(sink, cancel.clone());
        let result = self.drive(prepared, &sink, &cancel).await;

        self.ctx.finish_run(&run_id);
        result
    }

    /// Blocks the `relation` of `target` in the current task.
    #[tracing::instrument(skip(self, sink, cancel))]
    pub async fn block_relations(
        &self,
        target: &UserId,
        relation: RelationType,
        sink: DynEventSink,
        cancel: CancellationToken,
    ) -> Result<RunSummary, BlockRunError> {
        Self::validate_target(target)?;
        self.ctx.connected_account()?;

        let run_id = RunId::new();
        self.ctx.register_run(ActiveRun {
            run_id: run_id.clone(),
            target: target.clone(),
            relation,
            cancel: cancel.clone(),
        });

        let result = self
            .run_to_end(run_id.clone(), target, relation, sink, cancel)
            .await;

        self.ctx.finish_run(&run_id);
        result
    }

    /// Starts blocking the `relation` of `target` in the background.
    ///
    /// Runs against another target are cancelled, as is an earlier run for the same target
    /// and relation. Invalid input is rejected before anything is spawned.
    pub fn start_run(
        &self,
        target: &UserId,
        relation: RelationType,
        sink: DynEventSink,
    ) -> Result<BlockRunHandle, BlockRunError> {
        Self::validate_target(target)?;
        self.ctx.connected_account()?;

        let run_id = RunId::new();
        let cancel = CancellationToken::new();
        let (result_tx, result_rx) = oneshot::channel();

        self.ctx.register_run(ActiveRun {
            run_id: run_id.clone(),
            target: target.clone(),
            relation,
            cancel: cancel.clone(),
        });

        info!("Starting run {run_id} for the {relation} of {target}.");

        let service = self.clone();
        let handle = BlockRunHandle::new(
            run_id.clone(),
            target.clone(),
            relation,
            cancel.clone(),
            result_rx,
        );
        let target = target.clone();

        spawn(async move {
            let result = service
                .run_to_end(run_id.clone(), &target, relation, sink, cancel)
                .await;
            service.ctx.finish_run(&run_id);
            _ = result_tx.send(result);
        });

        Ok(handle)
    }
}

impl BulkBlockService {
    fn validate_target(target: &UserId) -> Result<(), BlockRunError> {
        if target.as_str().trim().is_empty() {
            return Err(BlockRunError::MissingTarget);
        }
        if !target.is_well_formed() {
            return Err(BlockRunError::InvalidIdentity { id: target.clone() });
        }
        Ok(())
    }

    async fn run_to_end(
        &self,
        run_id: RunId,
        target: &UserId,
        relation: RelationType,
        sink: DynEventSink,
        cancel: CancellationToken,
    ) -> Result<RunSummary, BlockRunError> {
        let sink = RunEventSink::new(sink, cancel.clone());
        sink.emit(ProgressEvent::status(format!(
            "Loading the {relation} of {target}…"
        )));

        let prepared = match self
            .prepare(run_id.clone(), target, relation, Some(&sink as &dyn EventSink))
            .await
        {
            Ok(prepared) => prepared,
            Err(err) => {
                sink.emit(ProgressEvent::error(
                    err.to_string(),
                    RunCounters::default(),
                    0,
                ));
                return Err(err);
            }
        };

        self.drive(prepared, &sink, &cancel).await
    }

    async fn prepare(
        &self,
        run_id: RunId,
        target: &UserId,
        relation: RelationType,
        sink: Option<&dyn EventSink>,
    ) -> Result<PreparedRun, BlockRunError> {
        Self::validate_target(target)?;
        let account = self.ctx.connected_account()?;
        let config = &self.ctx.config;

        let fetcher = PaginatedSetFetcher::new(self.directory_service.as_ref(), config.max_pages);

        let (candidates, mutuals, blocked) = futures::try_join!(
            async {
                fetcher
                    .drain(relation.into(), target)
                    .await
                    .map_err(|err| BlockRunError::Enumeration {
                        relation,
                        reason: format!("{err:#}"),
                    })
            },
            async {
                self.exclusion_sets_repo
                    .get_mutuals(&account.id)
                    .await
                    .map_err(|err| BlockRunError::ExclusionSets {
                        reason: format!("{err:#}"),
                    })
            },
            async {
                self.exclusion_sets_repo
                    .get_blocked(&account.id)
                    .await
                    .map_err(|err| BlockRunError::ExclusionSets {
                        reason: format!("{err:#}"),
                    })
            }
        )?;

        if candidates.truncated {
            warn!(
                "Only {} {relation} of {target} could be loaded.",
                candidates.len()
            );
            if let Some(sink) = sink {
                sink.emit(ProgressEvent::status(format!(
                    "Only {} {relation} could be loaded. Continuing with the partial list.",
                    candidates.len()
                )));
            }
        }

        let result = filter_targets(
            &candidates.identities,
            &account.id,
            &self.ctx.allow_list,
            &mutuals,
            &blocked,
        );

        if result.work_list.len() > config.max_work_list_len {
            return Err(BlockRunError::WorkListTooLarge {
                len: result.work_list.len(),
                max: config.max_work_list_len,
            });
        }

        info!(
            "Prepared run {run_id}. {} of {} {relation} to block, skipped {:?}.",
            result.work_list.len(),
            candidates.len(),
            result.skip_reasons
        );

        if let Some(sink) = sink {
            sink.emit(ProgressEvent::status(format!(
                "Found {} {relation}. Blocking {}, skipping {}.",
                candidates.len(),
                result.work_list.len(),
                result.skip_reasons.total()
            )));
        }

        Ok(PreparedRun {
            run_id,
            account,
            target: target.clone(),
            relation,
            work_list: result.work_list,
            skip_reasons: result.skip_reasons,
            candidates_truncated: candidates.truncated,
        })
    }

    /// Invokes the runner until the run completes, fails or is cancelled, waiting out every
    /// rate-limit cooldown in between.
    async fn drive(
        &self,
        prepared: PreparedRun,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> Result<RunSummary, BlockRunError> {
        let run_id = prepared.run_id.clone();
        let relation = prepared.relation;
        let skip_reasons = prepared.skip_reasons;

        let mut state = RunState::new(
            prepared.run_id,
            prepared.account.id,
            prepared.relation,
            prepared.work_list,
            prepared.skip_reasons,
            self.ctx.config.max_work_list_len,
        )?;
        let total = state.total();

        let mut controller =
            RecoveryController::new(self.time_provider.clone(), self.ctx.config.countdown_tick);

        let (counters, termination) = loop {
            match self.block_runner.run(&mut state, sink, cancel).await {
                RunOutcome::Completed { counters } => break (counters, RunTermination::Completed),
                RunOutcome::Failed { message, counters } => {
                    break (counters, RunTermination::Failed { message })
                }
                RunOutcome::Cancelled { counters } => break (counters, RunTermination::Cancelled),
                RunOutcome::RateLimited(paused) => {
                    let counters = paused.counters;
                    controller.on_rate_limit(paused);

                    match controller.wait_for_resume(cancel).await {
                        Some(paused) => {
                            sink.emit(ProgressEvent::status(format!(
                                "Resuming with {} remaining account(s).",
                                paused.remaining.len()
                            )));
                            state = RunState::resume(paused);
                            controller.finish_resume();
                        }
                        None if cancel.is_cancelled() => {
                            break (counters, RunTermination::Cancelled)
                        }
                        None => {
                            sink.emit(ProgressEvent::complete(counters, total, skip_reasons));
                            break (counters, RunTermination::Completed);
                        }
                    }
                }
            }
        };

        let summary = RunSummary::new(
            run_id,
            relation,
            counters,
            skip_reasons,
            total,
            termination,
        );
        info!("{}", summary.describe());
        Ok(summary)
    }
}
