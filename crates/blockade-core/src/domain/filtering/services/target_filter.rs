// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashSet;

use crate::domain::filtering::models::{AllowList, FilterResult, SkipReasons};
use crate::domain::shared::models::{Identity, UserId};

/// Splits `candidates` into the work list and per-reason skip counts.
///
/// Each candidate lands in exactly one bucket, checked in this order: the acting user,
/// the allow-list, `mutuals`, `blocked`. Whatever is left keeps its original order.
pub fn filter_targets(
    candidates: &[Identity],
    self_id: &UserId,
    allow_list: &AllowList,
    mutuals: &HashSet<UserId>,
    blocked: &HashSet<UserId>,
) -> FilterResult {
    let mut skip_reasons = SkipReasons::default();
    let mut work_list = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if &candidate.id == self_id || allow_list.contains(candidate) {
            skip_reasons.other += 1;
        } else if mutuals.contains(&candidate.id) {
            skip_reasons.mutual += 1;
        } else if blocked.contains(&candidate.id) {
            skip_reasons.already_blocked += 1;
        } else {
            work_list.push(candidate.clone());
        }
    }

    FilterResult {
        work_list,
        skip_reasons,
    }
}
