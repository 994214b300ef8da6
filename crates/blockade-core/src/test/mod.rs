// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use constant_time_provider::ConstantTimeProvider;
pub use in_memory_directory_service::InMemoryDirectoryService;
pub use loopback_run_transport::LoopbackRunTransport;
pub use mock_app_dependencies::{MockAppDependencies, MockBlockExecutorDependencies};
pub use paused_clock_time_provider::PausedClockTimeProvider;
pub use recording_event_sink::RecordingEventSink;
pub use scripted_relationship_service::ScriptedRelationshipService;
pub use static_capability_provider::StaticCapabilityProvider;


pub mod mock_data {
    pub use super::mock_app_dependencies::{
        mock_account as account, mock_reference_date as reference_date,
    };
}

#[macro_export]
macro_rules! user_id {
    ($id:expr) => {
        $crate::dtos::UserId::from($id)
    };
}

/// `identity!("alice")` expands to the identity `did:plc:alice` with handle `alice.test`.
#[macro_export]
macro_rules! identity {
    ($id:expr, $handle:expr) => {
        $crate::dtos::Identity::new($id, $handle)
    };
    ($name:expr) => {
        $crate::dtos::Identity::new(format!("did:plc:{}", $name), format!("{}.test", $name))
    };
}
