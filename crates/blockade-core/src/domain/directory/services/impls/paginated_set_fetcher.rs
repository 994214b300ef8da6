// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashSet;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::domain::directory::models::{CandidateSet, Cursor, Listing, Page};
use crate::domain::directory::services::DirectoryService;
use crate::domain::shared::models::{Identity, UserId};

/// Drains a cursor-paginated listing into a single `CandidateSet`.
///
/// The remote pagination is not under our control, so draining stops at the first repeated
/// cursor or after `max_pages` pages. A failing page after the first one yields the partial
/// set flagged as `truncated`, a failing first page fails the whole drain.
pub struct PaginatedSetFetcher<'a> {
    directory: &'a dyn DirectoryService,
    max_pages: usize,
}

impl<'a> PaginatedSetFetcher<'a> {
    pub fn new(directory: &'a dyn DirectoryService, max_pages: usize) -> Self {
        Self {
            directory,
            max_pages: max_pages.max(1),
        }
    }

    pub async fn drain(&self, listing: Listing, user_id: &UserId) -> Result<CandidateSet> {
        let mut identities = IndexMap::<UserId, Identity>::new();
        let mut seen_cursors = HashSet::<Cursor>::new();
        let mut cursor: Option<Cursor> = None;
        let mut pages = 0usize;
        let mut truncated = false;

        loop {
            if pages >= self.max_pages {
                warn!(
                    "Stopping enumeration of {listing} for {user_id} after {pages} pages. The set is truncated."
                );
                truncated = true;
                break;
            }

            let page = match self.load_page(listing, user_id, cursor.clone()).await {
                Ok(page) => page,
                Err(err) if pages == 0 => {
                    return Err(err).with_context(|| {
                        format!("Failed to load the first page of {listing} for {user_id}")
                    });
                }
                Err(err) => {
                    warn!(
                        "Failed to load page {} of {listing} for {user_id}. Continuing with {} partial results. Reason: {:#}",
                        pages + 1,
                        identities.len(),
                        err
                    );
                    truncated = true;
                    break;
                }
            };
            pages += 1;

            for identity in page.items {
                identities.entry(identity.id.clone()).or_insert(identity);
            }

            let Some(next_cursor) = page.next_cursor.filter(|c| !c.as_str().is_empty()) else {
                break;
            };

            if !seen_cursors.insert(next_cursor.clone()) {
                warn!("Listing {listing} for {user_id} returned the cursor '{next_cursor}' twice. Treating it as the end.");
                break;
            }
            cursor = Some(next_cursor);
        }

        debug!(
            "Loaded {} {listing} of {user_id} in {pages} page(s).",
            identities.len()
        );

        Ok(CandidateSet {
            identities: identities.into_values().collect(),
            truncated,
        })
    }

    async fn load_page(
        &self,
        listing: Listing,
        user_id: &UserId,
        cursor: Option<Cursor>,
    ) -> Result<Page> {
        match listing {
            Listing::Followers => self.directory.list_followers(user_id, cursor).await,
            Listing::Following => self.directory.list_following(user_id, cursor).await,
            Listing::Blocked => self.directory.list_blocked(user_id, cursor).await,
        }
    }
}
