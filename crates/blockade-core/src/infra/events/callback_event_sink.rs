// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use blockade_wasm_utils::{SendUnlessWasm, SyncUnlessWasm};

use crate::domain::blocking::models::ProgressEvent;
use crate::domain::blocking::services::EventSink;

/// Delivers events synchronously to a closure, for runs inside the caller's own process.
pub struct CallbackEventSink<F> {
    callback: F,
}

impl<F> CallbackEventSink<F>
where
    F: Fn(ProgressEvent),
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> EventSink for CallbackEventSink<F>
where
    F: Fn(ProgressEvent) + SendUnlessWasm + SyncUnlessWasm,
{
    fn emit(&self, event: ProgressEvent) {
        (self.callback)(event)
    }
}
