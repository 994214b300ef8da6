// blockade/blockade-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use blockade_core::dtos::{AppConfig, ProgressEvent};
use blockade_core::test::{
    mock_data, InMemoryDirectoryService, LoopbackRunTransport, PausedClockTimeProvider,
    RecordingEventSink, ScriptedRelationshipService, StaticCapabilityProvider,
};
use blockade_core::{Client, TimeProvider};

pub fn test_config() -> AppConfig {
    AppConfig {
        throttle_delay: Duration::from_millis(10),
        ..Default::default()
    }
}

/// A client wired to in-memory fakes. Must be created inside a runtime with paused time.
pub struct TestClient {
    pub client: Client,
    pub directory: Arc<InMemoryDirectoryService>,
    pub relationships: Arc<ScriptedRelationshipService>,
    pub capabilities: Arc<StaticCapabilityProvider>,
    pub events: Arc<RecordingEventSink>,
    pub time_provider: Arc<PausedClockTimeProvider>,
}

impl TestClient {
    /// A client that blocks directly against the fake relationship service.
    pub async fn new(directory: Arc<InMemoryDirectoryService>) -> Self {
        let relationships = Arc::new(ScriptedRelationshipService::default());
        let capabilities = Arc::new(StaticCapabilityProvider::new("token"));
        let time_provider = Arc::new(PausedClockTimeProvider::new(mock_data::reference_date()));

        let client = Client::builder()
            .set_directory_service(directory.clone())
            .set_capability_provider(capabilities.clone())
            .set_relationship_service(relationships.clone())
            .set_config(test_config())
            .set_time_provider(time_provider.clone())
            .build();

        Self::signed_in(client, directory, relationships, capabilities, time_provider).await
    }

    /// A client that delegates blocking to `backend`. It holds its own credential,
    /// `caller-token`, which differs from the backend's.
    pub async fn server_mediated(
        directory: Arc<InMemoryDirectoryService>,
        backend: &TestClient,
    ) -> (Self, Arc<LoopbackRunTransport>) {
        let transport = Arc::new(LoopbackRunTransport::new(backend.client.clone()));
        let capabilities = Arc::new(StaticCapabilityProvider::new("caller-token"));
        let time_provider = Arc::new(PausedClockTimeProvider::new(mock_data::reference_date()));

        let client = Client::builder()
            .set_directory_service(directory.clone())
            .set_capability_provider(capabilities.clone())
            .set_run_transport(transport.clone())
            .set_config(test_config())
            .set_time_provider(time_provider.clone())
            .build();

        let client = Self::signed_in(
            client,
            directory,
            backend.relationships.clone(),
            capabilities,
            time_provider,
        )
        .await;

        (client, transport)
    }

    async fn signed_in(
        client: Client,
        directory: Arc<InMemoryDirectoryService>,
        relationships: Arc<ScriptedRelationshipService>,
        capabilities: Arc<StaticCapabilityProvider>,
        time_provider: Arc<PausedClockTimeProvider>,
    ) -> Self {
        client
            .session
            .start_session(mock_data::account())
            .await
            .expect("Failed to start session");

        Self {
            client,
            directory,
            relationships,
            capabilities,
            events: Arc::new(RecordingEventSink::default()),
            time_provider,
        }
    }
}

impl TestClient {
    pub fn now(&self) -> DateTime<Utc> {
        self.time_provider.now()
    }

    /// Sleeps in small steps until an event matching `predicate` was recorded.
    pub async fn wait_for_event(&self, predicate: impl Fn(&ProgressEvent) -> bool) {
        for _ in 0..10_000 {
            if self.events.events().iter().any(&predicate) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("Timed out waiting for event. Recorded: {:?}", self.events.events());
    }
}

impl Deref for TestClient {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

/// Asserts that the counters carried by `events` never decrease and never exceed the total.
pub fn assert_monotonic_progress(events: &[ProgressEvent]) {
    let mut last = (0, 0);

    for event in events {
        let Some(counters) = event.counters() else {
            continue;
        };
        let total = match event {
            ProgressEvent::Progress { total, .. }
            | ProgressEvent::RateLimit { total, .. }
            | ProgressEvent::Complete { total, .. }
            | ProgressEvent::Error { total, .. } => *total,
            ProgressEvent::Status { .. } => unreachable!(),
        };

        assert!(
            counters.blocked >= last.0 && counters.failed >= last.1,
            "Counters went backwards at {event:?}"
        );
        assert!(
            counters.blocked + counters.failed <= total,
            "Counters exceed total at {event:?}"
        );
        last = (counters.blocked, counters.failed);
    }

    assert!(
        events.iter().filter(|event| event.is_terminal()).count() <= 1,
        "More than one terminal event in {events:?}"
    );
}
