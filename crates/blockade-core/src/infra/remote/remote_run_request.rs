// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};

use crate::domain::blocking::models::{RunCounters, RunState};
use crate::domain::filtering::models::SkipReasons;
use crate::domain::shared::models::{Identity, RelationType, RunId, UserId};

/// Body of the request that asks a trusted backend to block `targets` on behalf of `actor`.
///
/// `base` and `total` let the backend report counters that continue where a paused run
/// left off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRunRequest {
    pub run_id: RunId,
    pub actor: UserId,
    pub relation: RelationType,
    pub targets: Vec<Identity>,
    pub total: u64,
    pub base: RunCounters,
    pub skip_reasons: SkipReasons,
}

impl From<&RunState> for RemoteRunRequest {
    fn from(state: &RunState) -> Self {
        Self {
            run_id: state.run_id.clone(),
            actor: state.actor.clone(),
            relation: state.relation,
            targets: state.remaining().to_vec(),
            total: state.total(),
            base: state.counters(),
            skip_reasons: state.skip_reasons(),
        }
    }
}
