// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use exclusion_set_builder::ExclusionSetBuilder;

mod exclusion_set_builder;
