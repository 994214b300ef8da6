// blockade/blockade-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use chrono::Duration as ChronoDuration;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

use blockade_core::dtos::{
    BlockOutcome, BlockRunError, Capability, Identity, ProgressEvent, RelationType, RemoteRunRequest, RunCounters, RunId,
    RunTermination, SkipReasons, UserId,
};
use blockade_core::test::{mock_data, InMemoryDirectoryService, LoopbackRunTransport};
use blockade_core::{decode_event, identity, user_id};

use super::helpers::{assert_monotonic_progress, TestClient};

fn target() -> UserId {
    user_id!("did:plc:target")
}

fn identities(names: &[&str]) -> Vec<Identity> {
    names.iter().map(|name| identity!(name)).collect()
}

async fn setup(
    directory: InMemoryDirectoryService,
) -> (TestClient, TestClient, Arc<LoopbackRunTransport>) {
    let directory = Arc::new(directory);
    let backend = TestClient::new(directory.clone()).await;
    let (client, transport) = TestClient::server_mediated(directory, &backend).await;
    (backend, client, transport)
}

#[tokio::test(start_paused = true)]
async fn test_blocks_through_backend() -> Result<()> {
    let (_backend, client, transport) = setup(
        InMemoryDirectoryService::new(10)
            .with_followers(&target(), identities(&["a", "b", "c"]))
            .with_following(&target(), identities(&["c", "d"])),
    )
    .await;

    let summary = client
        .bulk_block
        .block_relations(
            &target(),
            RelationType::Followers,
            client.events.clone(),
            CancellationToken::new(),
        )
        .await?;

    assert_eq!(summary.termination, RunTermination::Completed);
    assert_eq!(summary.blocked, 3);
    assert_eq!(transport.requests().len(), 1);
    assert_eq!(
        transport.requests()[0].targets,
        identities(&["a", "b", "c"])
    );
    assert_eq!(client.relationships.blocked().len(), 3);
    assert_monotonic_progress(&client.events.events());

    // Blocks relayed by the backend land in the local cache.
    let following = client
        .bulk_block
        .prepare_run(&target(), RelationType::Following)
        .await?;
    assert_eq!(following.work_list, identities(&["d"]));
    assert_eq!(following.skip_reasons.already_blocked, 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_backend_signs_blocks_with_the_callers_capability() -> Result<()> {
    let (backend, client, _transport) = setup(
        InMemoryDirectoryService::new(10).with_followers(&target(), identities(&["a", "b"])),
    )
    .await;

    let summary = client
        .bulk_block
        .block_relations(
            &target(),
            RelationType::Followers,
            client.events.clone(),
            CancellationToken::new(),
        )
        .await?;

    assert_eq!(summary.termination, RunTermination::Completed);
    assert_eq!(
        backend.relationships.capabilities(),
        vec!["caller-token".to_string(), "caller-token".to_string()]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rejected_forwarded_capability_fails_the_run() -> Result<()> {
    let (backend, client, _transport) = setup(
        InMemoryDirectoryService::new(10).with_followers(&target(), identities(&["a", "b"])),
    )
    .await;
    backend
        .relationships
        .script(&user_id!("did:plc:a"), [BlockOutcome::AuthExpired]);

    let summary = client
        .bulk_block
        .block_relations(
            &target(),
            RelationType::Followers,
            client.events.clone(),
            CancellationToken::new(),
        )
        .await?;

    let RunTermination::Failed { message } = &summary.termination else {
        panic!("Expected the run to fail, got {summary:?}");
    };
    assert!(message.contains("renewed by the client"));
    assert_eq!(backend.capabilities.refresh_count(), 0);
    assert_eq!(
        backend.relationships.capabilities(),
        vec!["caller-token".to_string()]
    );
    assert!(backend.relationships.blocked().is_empty());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_resumes_remote_run_after_rate_limit() -> Result<()> {
    let (_backend, client, transport) = setup(
        InMemoryDirectoryService::new(10)
            .with_followers(&target(), identities(&["a", "b", "c", "d"])),
    )
    .await;

    let reset_at = mock_data::reference_date() + ChronoDuration::seconds(30);
    client
        .relationships
        .rate_limit_after(2, Some(reset_at.timestamp().to_string()));

    let summary = client
        .bulk_block
        .block_relations(
            &target(),
            RelationType::Followers,
            client.events.clone(),
            CancellationToken::new(),
        )
        .await?;

    assert_eq!(summary.termination, RunTermination::Completed);
    assert_eq!((summary.blocked, summary.total), (4, 4));

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].targets, identities(&["c", "d"]));
    assert_eq!(
        requests[1].base,
        RunCounters {
            blocked: 2,
            failed: 0
        }
    );
    assert_eq!(requests[1].total, 4);
    assert_eq!(requests[0].run_id, requests[1].run_id);

    assert_eq!(
        client.events.rate_limit_events(),
        vec![ProgressEvent::RateLimit {
            blocked: 2,
            failed: 0,
            total: 4,
            reset_at,
            remaining: 2,
        }]
    );
    assert_monotonic_progress(&client.events.events());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_lost_connection_fails_the_run() -> Result<()> {
    let (_backend, client, transport) = setup(
        InMemoryDirectoryService::new(10)
            .with_followers(&target(), identities(&["a", "b", "c"])),
    )
    .await;
    transport.drop_after_lines(1);

    let summary = client
        .bulk_block
        .block_relations(
            &target(),
            RelationType::Followers,
            client.events.clone(),
            CancellationToken::new(),
        )
        .await?;

    let RunTermination::Failed { message } = &summary.termination else {
        panic!("Expected the run to fail, got {summary:?}");
    };
    assert!(message.contains("closed the connection"));
    assert_eq!(summary.blocked, 1);
    assert!(matches!(
        client.events.last(),
        Some(ProgressEvent::Error { blocked: 1, .. })
    ));

    Ok(())
}

fn request(targets: Vec<Identity>) -> RemoteRunRequest {
    RemoteRunRequest {
        run_id: RunId::from("remote-run"),
        actor: mock_data::account().id,
        relation: RelationType::Followers,
        total: targets.len() as u64,
        targets,
        base: RunCounters::default(),
        skip_reasons: SkipReasons::default(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_serves_run_as_ndjson() -> Result<()> {
    let backend = TestClient::new(Arc::new(InMemoryDirectoryService::new(10))).await;

    let lines = backend
        .serve_block_run(
            Capability::new("caller-token"),
            request(identities(&["a", "b"])),
            CancellationToken::new(),
        )?
        .collect::<Vec<_>>()
        .await;

    assert!(lines.iter().all(|line| line.ends_with('\n')));

    let events = lines
        .iter()
        .map(|line| decode_event(line))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    assert_eq!(
        events,
        vec![
            ProgressEvent::Progress {
                blocked: 1,
                failed: 0,
                total: 2
            },
            ProgressEvent::Progress {
                blocked: 2,
                failed: 0,
                total: 2
            },
            ProgressEvent::Complete {
                blocked: 2,
                failed: 0,
                total: 2,
                skip_reasons: SkipReasons::default(),
            },
        ]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_only_direct_clients_serve_runs() {
    let (_backend, client, _transport) = setup(InMemoryDirectoryService::new(10)).await;

    assert!(matches!(
        client.serve_block_run(
            Capability::new("caller-token"),
            request(identities(&["a"])),
            CancellationToken::new()
        ),
        Err(BlockRunError::ServingUnsupported)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_rejects_invalid_remote_requests() {
    let backend = TestClient::new(Arc::new(InMemoryDirectoryService::new(10))).await;

    let mut invalid_actor = request(identities(&["a"]));
    invalid_actor.actor = user_id!("");
    assert!(matches!(
        backend.serve_block_run(
            Capability::new("caller-token"),
            invalid_actor,
            CancellationToken::new()
        ),
        Err(BlockRunError::InvalidIdentity { .. })
    ));

    let oversized = request(
        (0..60_000)
            .map(|idx| identity!(format!("account-{idx}")))
            .collect(),
    );
    assert!(matches!(
        backend.serve_block_run(
            Capability::new("caller-token"),
            oversized,
            CancellationToken::new()
        ),
        Err(BlockRunError::WorkListTooLarge {
            len: 60_000,
            max: 50_000
        })
    ));
}
