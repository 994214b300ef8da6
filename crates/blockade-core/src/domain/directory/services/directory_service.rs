// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use blockade_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::directory::models::{Cursor, Page};
use crate::domain::shared::models::UserId;

/// Read access to the social graph. A missing `cursor` requests the first page.
#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait DirectoryService: SendUnlessWasm + SyncUnlessWasm {
    async fn list_followers(&self, user_id: &UserId, cursor: Option<Cursor>) -> Result<Page>;
    async fn list_following(&self, user_id: &UserId, cursor: Option<Cursor>) -> Result<Page>;
    async fn list_blocked(&self, user_id: &UserId, cursor: Option<Cursor>) -> Result<Page>;
}

