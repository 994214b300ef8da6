// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::{RelationType, UserId};

/// Errors that prevent a run from starting or end it as a whole.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlockRunError {
    #[error("No target account was selected.")]
    MissingTarget,
    #[error("'{id}' is not a valid account identifier.")]
    InvalidIdentity { id: UserId },
    #[error("The work list contains {len} accounts which exceeds the maximum of {max}.")]
    WorkListTooLarge { len: usize, max: usize },
    #[error("No user is signed in.")]
    NotConnected,
    #[error("Authentication failed: {reason}")]
    Unauthenticated { reason: String },
    #[error("Failed to load the {relation} of the target account: {reason}")]
    Enumeration {
        relation: RelationType,
        reason: String,
    },
    #[error("Failed to load mutuals and blocked accounts: {reason}")]
    ExclusionSets { reason: String },
    #[error("The run ended without reporting a result.")]
    Interrupted,
    #[error("Only a client that blocks directly against the remote API can serve runs.")]
    ServingUnsupported,
}
