// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use caching_exclusion_sets_repository::CachingExclusionSetsRepository;

mod caching_exclusion_sets_repository;
