// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub mod blocking;
pub mod directory;
pub mod exclusions;
pub mod filtering;
pub mod general;
pub mod session;
pub mod shared;
