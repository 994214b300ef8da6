// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use block_runner::BlockRunner;
pub use event_sink::EventSink;
pub use relationship_service::RelationshipService;
pub use reset_time::resume_time;

mod block_runner;
mod event_sink;
pub mod impls;
mod relationship_service;
mod reset_time;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::event_sink::MockEventSink;
    pub use super::relationship_service::MockRelationshipService;
}
