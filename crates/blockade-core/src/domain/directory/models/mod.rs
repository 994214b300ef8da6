// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use candidate_set::CandidateSet;
pub use listing::Listing;
pub use page::{Cursor, Page};

mod candidate_set;
mod listing;
mod page;
