// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use blockade_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::shared::models::UserId;

/// Session-scoped cache of the identities that must never end up on a work list.
#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait ExclusionSetsRepository: SendUnlessWasm + SyncUnlessWasm {
    /// Identities `account` follows and is followed by.
    async fn get_mutuals(&self, account: &UserId) -> Result<HashSet<UserId>>;
    /// Identities `account` has already blocked, including those blocked during this session.
    async fn get_blocked(&self, account: &UserId) -> Result<HashSet<UserId>>;

    /// Records a confirmed block without reading the block list from the directory. Returns
    /// `true` if `user_id` was not recorded as blocked yet.
    async fn insert_blocked(&self, account: &UserId, user_id: &UserId) -> Result<bool>;

    async fn clear_cache(&self) -> Result<()>;
}
