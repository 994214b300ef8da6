// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use blockade_utils::id_string;

id_string!(
    /// Correlates the events, logs and remote streams of one blocking run.
    RunId
);

impl RunId {
    pub fn new() -> Self {
        RunId::from(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}
