// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use blockade_utils::id_string;

id_string!(
    /// Stable, opaque account identifier (e.g. a DID).
    ///
    /// This is the only key used for equality and set membership.
    UserId
);

id_string!(
    /// Human-readable account name. It may change at any time and is used for display only.
    Handle
);

impl UserId {
    /// Returns `false` for empty identifiers or identifiers containing whitespace.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && !self.0.chars().any(char::is_whitespace)
    }
}

impl Handle {
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}
