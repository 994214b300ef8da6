// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{Handle, UserId};

/// An account as returned by a listing.
///
/// Equality and hashing only consider `id`, a stale `handle` never makes two
/// identities differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub handle: Handle,
}

impl Identity {
    pub fn new(id: impl Into<UserId>, handle: impl Into<Handle>) -> Self {
        Self {
            id: id.into(),
            handle: handle.into(),
        }
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}
