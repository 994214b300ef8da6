// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};

/// Number of candidates left off a work list, per reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipReasons {
    pub mutual: u64,
    pub already_blocked: u64,
    /// The acting user themself and allow-listed accounts.
    pub other: u64,
}

impl SkipReasons {
    pub fn total(&self) -> u64 {
        self.mutual + self.already_blocked + self.other
    }
}
