// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use strum_macros::Display;

use crate::domain::shared::models::RelationType;

/// The paginated listings offered by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Listing {
    Followers,
    Following,
    Blocked,
}

impl From<RelationType> for Listing {
    fn from(value: RelationType) -> Self {
        match value {
            RelationType::Followers => Listing::Followers,
            RelationType::Following => Listing::Following,
        }
    }
}
