// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use blockade_wasm_utils::PinnedStream;

use crate::app::deps::{DynAppContext, DynBlockRunner};
use crate::app::services::{BulkBlockService, SessionService};
use crate::client_builder::{
    ClientBuilder, UndefinedCapabilityProvider, UndefinedDirectoryService, UndefinedStrategy,
};
use crate::domain::blocking::models::BlockRunError;
use crate::domain::blocking::services::impls::BlockExecutor;
use crate::domain::session::models::Capability;
use crate::domain::shared::models::Identity;
use crate::infra::remote::{serve_block_run, RemoteRunRequest};

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    pub fn builder(
    ) -> ClientBuilder<UndefinedDirectoryService, UndefinedCapabilityProvider, UndefinedStrategy>
    {
        ClientBuilder::new()
    }
}

pub struct ClientInner {
    pub bulk_block: BulkBlockService,
    pub session: SessionService,
    pub(crate) block_runner: DynBlockRunner,
    pub(crate) ctx: DynAppContext,
    /// Present when the client blocks directly against the remote API.
    pub(crate) executor: Option<Arc<BlockExecutor>>,
}

impl From<Arc<ClientInner>> for Client {
    fn from(inner: Arc<ClientInner>) -> Self {
        Client { inner }
    }
}

impl Deref for Client {
    type Target = ClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Client {
    pub fn connected_account(&self) -> Option<Identity> {
        self.ctx.connected_account().ok()
    }

    /// Executes a request received from a client that uses the server-mediated strategy and
    /// returns the response body as NDJSON lines. Mutations are signed with `capability`, the
    /// credential the requesting client sent.
    pub fn serve_block_run(
        &self,
        capability: Capability,
        request: RemoteRunRequest,
        cancel: CancellationToken,
    ) -> Result<PinnedStream<String>, BlockRunError> {
        let Some(executor) = &self.executor else {
            return Err(BlockRunError::ServingUnsupported);
        };

        serve_block_run(
            executor,
            capability,
            request,
            self.ctx.config.max_work_list_len,
            cancel,
        )
    }
}
