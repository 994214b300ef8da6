// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::exclusions::repos::ExclusionSetsRepository;
use crate::domain::exclusions::services::ExclusionSetBuilder;
use crate::domain::shared::models::UserId;

/// Keeps the exclusion sets of the signed-in account for the lifetime of the session.
///
/// Each set is built lazily on first access. Confirmed blocks are added to the cached block
/// list so that later runs skip them without re-reading the directory. Blocks confirmed before
/// the block list was built are kept aside and merged into it once it is.
pub struct CachingExclusionSetsRepository {
    builder: ExclusionSetBuilder,
    mutuals: RwLock<Option<CachedSet>>,
    blocked: RwLock<Option<CachedSet>>,
    /// Always locked before `blocked`.
    pending_blocked: RwLock<Option<CachedSet>>,
    load_guard: Mutex<()>,
}

struct CachedSet {
    account: UserId,
    ids: HashSet<UserId>,
}

#[derive(Clone, Copy)]
enum SetKind {
    Mutuals,
    Blocked,
}

impl CachingExclusionSetsRepository {
    pub fn new(builder: ExclusionSetBuilder) -> Self {
        Self {
            builder,
            mutuals: Default::default(),
            blocked: Default::default(),
            pending_blocked: Default::default(),
            load_guard: Default::default(),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(? Send))]
#[async_trait]
impl ExclusionSetsRepository for CachingExclusionSetsRepository {
    async fn get_mutuals(&self, account: &UserId) -> Result<HashSet<UserId>> {
        self.load_if_needed(SetKind::Mutuals, account).await?;
        Ok(self.cached(SetKind::Mutuals, account).unwrap_or_default())
    }

    async fn get_blocked(&self, account: &UserId) -> Result<HashSet<UserId>> {
        self.load_if_needed(SetKind::Blocked, account).await?;
        Ok(self.cached(SetKind::Blocked, account).unwrap_or_default())
    }

    async fn insert_blocked(&self, account: &UserId, user_id: &UserId) -> Result<bool> {
        let mut pending = self.pending_blocked.write();

        if let Some(set) = self
            .blocked
            .write()
            .as_mut()
            .filter(|set| &set.account == account)
        {
            return Ok(set.ids.insert(user_id.clone()));
        }

        if pending.as_ref().is_some_and(|set| &set.account != account) {
            pending.take();
        }
        let set = pending.get_or_insert_with(|| CachedSet {
            account: account.clone(),
            ids: Default::default(),
        });
        Ok(set.ids.insert(user_id.clone()))
    }

    async fn clear_cache(&self) -> Result<()> {
        let _guard = self.load_guard.lock().await;

        self.mutuals.write().take();
        self.pending_blocked.write().take();
        self.blocked.write().take();
        Ok(())
    }
}

impl CachingExclusionSetsRepository {
    fn slot(&self, kind: SetKind) -> &RwLock<Option<CachedSet>> {
        match kind {
            SetKind::Mutuals => &self.mutuals,
            SetKind::Blocked => &self.blocked,
        }
    }

    fn cached(&self, kind: SetKind, account: &UserId) -> Option<HashSet<UserId>> {
        self.slot(kind)
            .read()
            .as_ref()
            .filter(|set| &set.account == account)
            .map(|set| set.ids.clone())
    }

    fn is_loaded(&self, kind: SetKind, account: &UserId) -> bool {
        self.slot(kind)
            .read()
            .as_ref()
            .map(|set| &set.account == account)
            .unwrap_or(false)
    }

    async fn load_if_needed(&self, kind: SetKind, account: &UserId) -> Result<()> {
        if self.is_loaded(kind, account) {
            return Ok(());
        }

        let _guard = self.load_guard.lock().await;

        // Another caller might have loaded the set while we were waiting.
        if self.is_loaded(kind, account) {
            return Ok(());
        }

        let ids = match kind {
            SetKind::Mutuals => self.builder.build_mutuals(account).await?,
            SetKind::Blocked => self.builder.build_blocked(account).await?,
        };

        info!(
            "Cached {} {} for {account}.",
            ids.len(),
            match kind {
                SetKind::Mutuals => "mutual(s)",
                SetKind::Blocked => "blocked account(s)",
            }
        );

        self.store(kind, account, ids);
        Ok(())
    }

    fn store(&self, kind: SetKind, account: &UserId, mut ids: HashSet<UserId>) {
        let mut pending = self.pending_blocked.write();

        if matches!(kind, SetKind::Blocked)
            && pending.as_ref().is_some_and(|set| &set.account == account)
        {
            if let Some(set) = pending.take() {
                ids.extend(set.ids);
            }
        }

        self.slot(kind).write().replace(CachedSet {
            account: account.clone(),
            ids,
        });
    }
}
