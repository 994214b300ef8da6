// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use directory_service::DirectoryService;

mod directory_service;
pub mod impls;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::directory_service::MockDirectoryService;
}
