// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use blockade_wasm_utils::{PinnedStream, SendUnlessWasm, SyncUnlessWasm};

use crate::domain::session::models::Capability;

use super::RemoteRunRequest;

/// Push channel to a trusted backend that executes runs on the caller's behalf.
///
/// The returned stream yields the raw lines of the response body, each holding one
/// JSON-encoded progress event.
#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait RunTransport: SendUnlessWasm + SyncUnlessWasm {
    async fn open_run(
        &self,
        capability: &Capability,
        request: RemoteRunRequest,
    ) -> Result<PinnedStream<Result<String>>>;
}
