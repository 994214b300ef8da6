// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;

use blockade_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::blocking::models::{BatchBlockOutcome, BlockOutcome};
use crate::domain::session::models::Capability;
use crate::domain::shared::models::UserId;

/// Adapter around the remote relationship-mutation API.
///
/// Implementations classify every response into a closed outcome, transport errors included.
#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait RelationshipService: SendUnlessWasm + SyncUnlessWasm {
    async fn create_block(
        &self,
        capability: &Capability,
        actor: &UserId,
        target: &UserId,
    ) -> BlockOutcome;

    /// Blocks all `targets` in a single write.
    async fn create_blocks(
        &self,
        capability: &Capability,
        actor: &UserId,
        targets: &[UserId],
    ) -> BatchBlockOutcome;
}
