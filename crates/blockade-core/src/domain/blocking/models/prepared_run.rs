// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::filtering::models::SkipReasons;
use crate::domain::shared::models::{Identity, RelationType, RunId, UserId};

/// A filtered work list, ready to be executed.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRun {
    pub run_id: RunId,
    /// The acting account.
    pub account: Identity,
    /// The account whose followers or followees are blocked.
    pub target: UserId,
    pub relation: RelationType,
    pub work_list: Vec<Identity>,
    pub skip_reasons: SkipReasons,
    /// `true` if not all candidates could be enumerated.
    pub candidates_truncated: bool,
}

impl PreparedRun {
    pub fn candidate_count(&self) -> u64 {
        self.work_list.len() as u64 + self.skip_reasons.total()
    }
}
