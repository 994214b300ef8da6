// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::domain::session::models::Capability;
use crate::domain::session::services::CapabilityProvider;

/// Hands out the capability a client sent along with its run request.
///
/// Only the client can renew it. A rejected capability therefore ends the run with an error
/// and the client has to authenticate again before resuming.
pub struct ForwardedCapabilityProvider {
    capability: Capability,
}

impl ForwardedCapabilityProvider {
    pub fn new(capability: Capability) -> Self {
        Self { capability }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
impl CapabilityProvider for ForwardedCapabilityProvider {
    async fn capability(&self) -> Result<Capability> {
        Ok(self.capability.clone())
    }

    async fn refresh_capability(&self) -> Result<Capability> {
        bail!("The capability sent with the run was rejected and can only be renewed by the client.")
    }
}
