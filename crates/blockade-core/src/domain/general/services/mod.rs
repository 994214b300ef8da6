// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use time_provider::TimeProvider;

mod time_provider;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::time_provider::MockTimeProvider;
}
