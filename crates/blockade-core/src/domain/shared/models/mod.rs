// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use identity::Identity;
pub use relation_type::RelationType;
pub use run_id::RunId;
pub use user_id::{Handle, UserId};

mod identity;
mod relation_type;
mod run_id;
mod user_id;
