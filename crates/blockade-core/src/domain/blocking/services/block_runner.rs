// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use blockade_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::blocking::models::{RunOutcome, RunState};

use super::EventSink;

/// Executes a work list, either directly against the remote API or through a trusted backend.
///
/// An invocation ends with a `complete` or `error` event, a single `rate_limit` event, or,
/// when `cancel` fires, with no further events at all.
#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
pub trait BlockRunner: SendUnlessWasm + SyncUnlessWasm {
    async fn run(
        &self,
        state: &mut RunState,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> RunOutcome;
}
