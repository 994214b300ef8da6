// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use allow_list::{AllowList, AllowListEntry};
pub use filter_result::FilterResult;
pub use skip_reasons::SkipReasons;

mod allow_list;
mod filter_result;
mod skip_reasons;
