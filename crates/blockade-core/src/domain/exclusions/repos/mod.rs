// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use exclusion_sets_repository::ExclusionSetsRepository;

mod exclusion_sets_repository;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::exclusion_sets_repository::MockExclusionSetsRepository;
}
