// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashSet;

use crate::domain::shared::models::{Identity, UserId};

/// All identities of a drained listing, de-duplicated by id, in the order they were received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    pub identities: Vec<Identity>,
    /// Set when enumeration stopped before the listing reported its end.
    pub truncated: bool,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn ids(&self) -> HashSet<UserId> {
        self.identities.iter().map(|i| i.id.clone()).collect()
    }
}
