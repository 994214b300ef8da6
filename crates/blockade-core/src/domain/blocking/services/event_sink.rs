// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use blockade_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::blocking::models::ProgressEvent;

/// Observer of a run's progress. Events arrive in the order they were generated.
#[cfg_attr(feature = "test", mockall::automock)]
pub trait EventSink: SendUnlessWasm + SyncUnlessWasm {
    fn emit(&self, event: ProgressEvent);
}
