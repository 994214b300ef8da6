// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use callback_event_sink::CallbackEventSink;
pub use channel_event_sink::ChannelEventSink;
pub use ndjson::{decode_event, encode_event};

mod callback_event_sink;
mod channel_event_sink;
mod ndjson;
