// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashSet;

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::app::deps::DynDirectoryService;
use crate::domain::directory::models::Listing;
use crate::domain::directory::services::impls::PaginatedSetFetcher;
use crate::domain::shared::models::UserId;

/// Computes the exclusion sets of the acting user from the directory.
pub struct ExclusionSetBuilder {
    directory: DynDirectoryService,
    max_pages: usize,
}

impl ExclusionSetBuilder {
    pub fn new(directory: DynDirectoryService, max_pages: usize) -> Self {
        Self {
            directory,
            max_pages,
        }
    }

    /// Intersection (by id) of the followers and followees of `user_id`.
    ///
    /// Both listings must be complete. A partial mutual set would let a protected account slip
    /// onto a work list.
    pub async fn build_mutuals(&self, user_id: &UserId) -> Result<HashSet<UserId>> {
        let fetcher = PaginatedSetFetcher::new(self.directory.as_ref(), self.max_pages);

        let (followers, following) = futures::try_join!(
            fetcher.drain(Listing::Followers, user_id),
            fetcher.drain(Listing::Following, user_id)
        )?;

        if followers.truncated || following.truncated {
            bail!("Could not load the complete follower and followee lists of {user_id}.")
        }

        let followers = followers.ids();
        let mutuals = following
            .identities
            .into_iter()
            .filter(|identity| followers.contains(&identity.id))
            .map(|identity| identity.id)
            .collect::<HashSet<_>>();

        info!("Found {} mutual(s) for {user_id}.", mutuals.len());
        Ok(mutuals)
    }

    /// Identities `user_id` has blocked.
    ///
    /// A truncated block list is accepted, the worst case is a redundant block.
    pub async fn build_blocked(&self, user_id: &UserId) -> Result<HashSet<UserId>> {
        let fetcher = PaginatedSetFetcher::new(self.directory.as_ref(), self.max_pages);
        let blocked = fetcher.drain(Listing::Blocked, user_id).await?;

        if blocked.truncated {
            warn!(
                "Block list of {user_id} is incomplete ({} entries loaded).",
                blocked.len()
            );
        }

        Ok(blocked.ids())
    }
}
