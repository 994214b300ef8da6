// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::shared::models::Identity;

use super::SkipReasons;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterResult {
    pub work_list: Vec<Identity>,
    pub skip_reasons: SkipReasons,
}
