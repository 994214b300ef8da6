// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::{Identity, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowListEntry {
    /// Matches an account by its stable id.
    Id(UserId),
    /// Matches an account whose handle equals this value (case-insensitive).
    Handle(String),
    /// Matches every account whose handle ends with this value (case-insensitive).
    HandleSuffix(String),
}

/// Accounts run by the network operator. They are never blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    entries: Vec<AllowListEntry>,
}

impl AllowList {
    pub fn new(entries: impl IntoIterator<Item = AllowListEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| match entry {
                    AllowListEntry::Handle(handle) => AllowListEntry::Handle(handle.to_lowercase()),
                    AllowListEntry::HandleSuffix(suffix) => {
                        AllowListEntry::HandleSuffix(suffix.to_lowercase())
                    }
                    entry => entry,
                })
                .collect(),
        }
    }

    pub fn protocol_operators() -> Self {
        Self::new([
            AllowListEntry::Id(UserId::from("did:plc:z72i7hdynmk6r22z27h6tvur")),
            AllowListEntry::Handle("bsky.app".to_string()),
            AllowListEntry::HandleSuffix(".bsky.team".to_string()),
        ])
    }

    pub fn empty() -> Self {
        Self { entries: vec![] }
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        let handle = identity.handle.to_lowercase();

        self.entries.iter().any(|entry| match entry {
            AllowListEntry::Id(id) => id == &identity.id,
            AllowListEntry::Handle(h) => h == &handle,
            AllowListEntry::HandleSuffix(suffix) => handle.ends_with(suffix.as_str()),
        })
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::protocol_operators()
    }
}
