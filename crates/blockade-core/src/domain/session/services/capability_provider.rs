// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use blockade_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::session::models::Capability;

/// Supplies the credential used for mutation calls. Failing either method means the user
/// is unauthenticated and has to sign in again.
#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait CapabilityProvider: SendUnlessWasm + SyncUnlessWasm {
    async fn capability(&self) -> Result<Capability>;
    async fn refresh_capability(&self) -> Result<Capability>;
}
