// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use blockade_wasm_utils::{spawn, BlockadeStreamExt, PinnedStream};

use crate::domain::blocking::models::{BlockRunError, RunState};
use crate::domain::blocking::services::impls::{BlockExecutor, RunEventSink};
use crate::domain::blocking::services::BlockRunner;
use crate::domain::session::models::Capability;
use crate::infra::events::{encode_event, ChannelEventSink};

use super::{ForwardedCapabilityProvider, RemoteRunRequest};

/// Backend side of the push channel.
///
/// Validates `request`, runs it with `executor` in a background task and returns the progress
/// events as NDJSON lines. Every mutation is signed with the `capability` the client sent. The
/// stream ends after the terminal or `rate_limit` event. The cooldown is left to the client,
/// which sends a new request with the remaining targets.
pub fn serve_block_run(
    executor: &BlockExecutor,
    capability: Capability,
    request: RemoteRunRequest,
    max_work_list_len: usize,
    cancel: CancellationToken,
) -> Result<PinnedStream<String>, BlockRunError> {
    if !request.actor.is_well_formed() {
        return Err(BlockRunError::InvalidIdentity { id: request.actor });
    }

    let mut state = RunState::new(
        request.run_id,
        request.actor,
        request.relation,
        request.targets,
        request.skip_reasons,
        max_work_list_len,
    )?
    .with_progress(request.base, request.total);

    info!(
        "Serving run {} with {} target(s).",
        state.run_id,
        state.work_list().len()
    );

    let runner =
        executor.with_capability_provider(Arc::new(ForwardedCapabilityProvider::new(capability)));
    let (sink, events) = ChannelEventSink::new();

    spawn(async move {
        let sink = RunEventSink::new(Arc::new(sink), cancel.clone());
        runner.run(&mut state, &sink, &cancel).await;
    });

    Ok(events
        .filter_map(|event| async move {
            match encode_event(&event) {
                Ok(line) => Some(line),
                Err(err) => {
                    error!("Failed to encode {event:?}. {err:#}");
                    None
                }
            }
        })
        .pinned())
}
