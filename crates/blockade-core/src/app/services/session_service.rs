// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use tracing::{info, warn};

use blockade_proc_macros::InjectDependencies;

use crate::app::deps::{DynAppContext, DynExclusionSetsRepository};
use crate::domain::blocking::models::BlockRunError;
use crate::domain::session::models::SessionProperties;
use crate::domain::shared::models::Identity;

/// Owns the lifecycle of the signed-in account and of its session-scoped caches.
#[derive(InjectDependencies)]
pub struct SessionService {
    #[inject]
    ctx: DynAppContext,
    #[inject]
    exclusion_sets_repo: DynExclusionSetsRepository,
}

impl SessionService {
    pub async fn start_session(&self, account: Identity) -> Result<(), BlockRunError> {
        if !account.id.is_well_formed() {
            return Err(BlockRunError::InvalidIdentity { id: account.id });
        }

        if let Ok(previous) = self.ctx.connected_account() {
            if previous.id != account.id {
                self.end_session().await;
            }
        }

        info!("Starting session for {} ({}).", account.id, account.handle);
        self.ctx.set_session(SessionProperties { account });
        Ok(())
    }

    /// Cancels all runs and drops the exclusion caches.
    pub async fn end_session(&self) {
        self.ctx.cancel_runs();

        if let Err(err) = self.exclusion_sets_repo.clear_cache().await {
            warn!("Failed to clear the exclusion caches. {err:#}");
        }

        if let Some(session) = self.ctx.end_session() {
            info!("Ended session of {}.", session.account.id);
        }
    }

    pub fn connected_account(&self) -> Option<Identity> {
        self.ctx.connected_account().ok()
    }

    /// Drops and rebuilds the mutual and blocked sets of the signed-in account.
    pub async fn refresh_exclusions(&self) -> Result<()> {
        let account = self.ctx.connected_account()?;

        self.exclusion_sets_repo.clear_cache().await?;
        let (mutuals, blocked) = futures::try_join!(
            self.exclusion_sets_repo.get_mutuals(&account.id),
            self.exclusion_sets_repo.get_blocked(&account.id)
        )?;

        info!(
            "Refreshed exclusions of {}. {} mutual(s), {} blocked.",
            account.id,
            mutuals.len(),
            blocked.len()
        );
        Ok(())
    }
}
