// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::debug;

use blockade_wasm_utils::{BlockadeStreamExt, PinnedStream};

use crate::domain::blocking::models::ProgressEvent;
use crate::domain::blocking::services::EventSink;

/// Turns emitted events into a stream. The stream ends once the sink is dropped.
pub struct ChannelEventSink {
    sender: UnboundedSender<ProgressEvent>,
}

impl ChannelEventSink {
    pub fn new() -> (Self, PinnedStream<ProgressEvent>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, UnboundedReceiverStream::new(receiver).pinned())
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ProgressEvent) {
        if let Err(err) = self.sender.send(event) {
            debug!("Dropping {:?} since the receiver is gone.", err.0);
        }
    }
}
