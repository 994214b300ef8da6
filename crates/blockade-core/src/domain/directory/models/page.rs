// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use blockade_utils::id_string;

use crate::domain::shared::models::Identity;

id_string!(
    /// Opaque pagination token handed out by a listing.
    Cursor
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Identity>,
    /// `None` marks the last page.
    pub next_cursor: Option<Cursor>,
}

impl Page {
    pub fn last(items: Vec<Identity>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    pub fn with_cursor(items: Vec<Identity>, cursor: impl Into<Cursor>) -> Self {
        Self {
            items,
            next_cursor: Some(cursor.into()),
        }
    }
}
