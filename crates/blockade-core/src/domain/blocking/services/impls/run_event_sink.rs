// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::app::deps::DynEventSink;
use crate::domain::blocking::models::ProgressEvent;
use crate::domain::blocking::services::EventSink;

/// Forwards the events of one run to its observer.
///
/// Nothing is forwarded once a terminal event went out or the run was cancelled.
pub struct RunEventSink {
    inner: DynEventSink,
    cancel: CancellationToken,
    terminated: AtomicBool,
}

impl RunEventSink {
    pub fn new(inner: DynEventSink, cancel: CancellationToken) -> Self {
        Self {
            inner,
            cancel,
            terminated: AtomicBool::new(false),
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }
}

impl EventSink for RunEventSink {
    fn emit(&self, event: ProgressEvent) {
        if self.cancel.is_cancelled() {
            debug!("Dropping {event:?} of a cancelled run.");
            return;
        }

        if event.is_terminal() {
            if self.terminated.swap(true, Ordering::AcqRel) {
                debug!("Dropping {event:?} after the run terminated.");
                return;
            }
        } else if self.is_terminated() {
            debug!("Dropping {event:?} after the run terminated.");
            return;
        }

        self.inner.emit(event)
    }
}
