// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use capability::Capability;
pub use session_properties::SessionProperties;

mod capability;
mod session_properties;
