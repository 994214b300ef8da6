// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use crate::app::deps::AppConfig;
pub use crate::domain::{
    blocking::models::{
        BatchBlockOutcome, BlockOutcome, BlockRunError, PausedRun, PreparedRun, ProgressEvent,
        RunCounters, RunSummary, RunTermination,
    },
    directory::models::{Cursor, Page},
    filtering::models::SkipReasons,
    session::models::Capability,
    shared::models::{Handle, Identity, RelationType, RunId, UserId},
};
pub use crate::infra::remote::RemoteRunRequest;
