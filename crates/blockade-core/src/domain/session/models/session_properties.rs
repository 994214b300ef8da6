// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::Identity;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionProperties {
    /// The account on whose behalf blocks are created.
    pub account: Identity,
}
