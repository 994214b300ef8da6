// blockade/blockade-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use chrono::Duration as ChronoDuration;
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

use blockade_core::dtos::{
    BlockOutcome, Identity, ProgressEvent, RelationType, RunTermination, SkipReasons, UserId,
};
use blockade_core::test::{mock_data, InMemoryDirectoryService};
use blockade_core::{identity, user_id};

use super::helpers::{assert_monotonic_progress, TestClient};

fn target() -> UserId {
    user_id!("did:plc:target")
}

fn identities(names: &[&str]) -> Vec<Identity> {
    names.iter().map(|name| identity!(name)).collect()
}

#[tokio::test(start_paused = true)]
async fn test_blocks_followers_across_rate_limit() -> Result<()> {
    let me = mock_data::account().id;
    let mut followers = identities(&["a", "friend", "b", "c", "old-foe", "d", "e"]);
    followers.push(mock_data::account());

    let directory = Arc::new(
        InMemoryDirectoryService::new(3)
            .with_followers(&target(), followers)
            .with_followers(&me, identities(&["friend"]))
            .with_following(&me, identities(&["friend"]))
            .with_blocked(&me, identities(&["old-foe"])),
    );
    let client = TestClient::new(directory).await;

    let reset_at = mock_data::reference_date() + ChronoDuration::seconds(60);
    client
        .relationships
        .rate_limit_after(2, Some(reset_at.timestamp().to_string()));

    let started_at = tokio::time::Instant::now();
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
    assert_eq!((summary.blocked, summary.failed, summary.total), (5, 0, 5));
    assert_eq!(
        summary.skipped,
        SkipReasons {
            mutual: 1,
            already_blocked: 1,
            other: 1,
        }
    );
    assert_eq!(
        client.relationships.blocked(),
        ["a", "b", "c", "d", "e"]
            .iter()
            .map(|name| UserId::from(format!("did:plc:{name}")))
            .collect::<Vec<_>>()
    );
    assert!(started_at.elapsed() >= std::time::Duration::from_secs(59));

    let events = client.events.events();
    assert_monotonic_progress(&events);

    let rate_limits = client.events.rate_limit_events();
    assert_eq!(
        rate_limits,
        vec![ProgressEvent::RateLimit {
            blocked: 2,
            failed: 0,
            total: 5,
            reset_at,
            remaining: 3,
        }]
    );
    assert!(events.contains(&ProgressEvent::status(
        "Resuming with 3 remaining account(s)."
    )));
    assert_eq!(
        client.events.last(),
        Some(ProgressEvent::Complete {
            blocked: 5,
            failed: 0,
            total: 5,
            skip_reasons: summary.skipped,
        })
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_never_blocks_an_account_twice() -> Result<()> {
    let directory = Arc::new(
        InMemoryDirectoryService::new(10)
            .with_followers(&target(), identities(&["a", "b", "c"]))
            .with_following(&target(), identities(&["b", "c", "d"])),
    );
    let client = TestClient::new(directory).await;

    let followers = client
        .bulk_block
        .block_relations(
            &target(),
            RelationType::Followers,
            client.events.clone(),
            CancellationToken::new(),
        )
        .await?;
    let following = client
        .bulk_block
        .block_relations(
            &target(),
            RelationType::Following,
            client.events.clone(),
            CancellationToken::new(),
        )
        .await?;

    assert_eq!(followers.blocked, 3);
    assert_eq!(following.blocked, 1);
    assert_eq!(following.skipped.already_blocked, 2);

    let calls = client.relationships.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls.iter().collect::<HashSet<_>>().len(), 4);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_prepare_run_does_not_block() -> Result<()> {
    let directory = Arc::new(
        InMemoryDirectoryService::new(10).with_following(&target(), identities(&["a", "b"])),
    );
    let client = TestClient::new(directory).await;

    let prepared = client
        .bulk_block
        .prepare_run(&target(), RelationType::Following)
        .await?;

    assert_eq!(prepared.work_list, identities(&["a", "b"]));
    assert!(client.relationships.calls().is_empty());

    let summary = client
        .bulk_block
        .execute(prepared, client.events.clone(), CancellationToken::new())
        .await?;

    assert!(summary.is_completed());
    assert_eq!(client.relationships.calls().len(), 2);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cancelling_during_cooldown_stops_the_run() -> Result<()> {
    let directory = Arc::new(
        InMemoryDirectoryService::new(10).with_followers(&target(), identities(&["a", "b", "c"])),
    );
    let client = TestClient::new(directory).await;

    let reset_at = mock_data::reference_date() + ChronoDuration::minutes(10);
    client
        .relationships
        .rate_limit_after(1, Some(reset_at.timestamp().to_string()));

    let handle =
        client
            .bulk_block
            .start_run(&target(), RelationType::Followers, client.events.clone())?;

    client
        .wait_for_event(|event| matches!(event, ProgressEvent::RateLimit { .. }))
        .await;
    handle.cancel();

    let summary = handle.wait().await?;

    assert_eq!(summary.termination, RunTermination::Cancelled);
    assert_eq!(summary.blocked, 1);
    assert_eq!(client.relationships.calls().len(), 2);
    assert!(client.events.terminal_events().is_empty());
    assert!(client.now() < reset_at);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_run_against_new_target_supersedes_running_run() -> Result<()> {
    let other_target = user_id!("did:plc:other-target");
    let directory = Arc::new(
        InMemoryDirectoryService::new(10)
            .with_followers(&target(), identities(&["a", "b"]))
            .with_followers(&other_target, identities(&["x"])),
    );
    let client = TestClient::new(directory).await;

    let reset_at = mock_data::reference_date() + ChronoDuration::minutes(10);
    client
        .relationships
        .rate_limit_after(1, Some(reset_at.timestamp().to_string()));

    let first =
        client
            .bulk_block
            .start_run(&target(), RelationType::Followers, client.events.clone())?;
    client
        .wait_for_event(|event| matches!(event, ProgressEvent::RateLimit { .. }))
        .await;

    let second = client.bulk_block.start_run(
        &other_target,
        RelationType::Followers,
        client.events.clone(),
    )?;

    assert!(first.is_cancelled());
    assert_eq!(
        first.wait().await?.termination,
        RunTermination::Cancelled
    );

    let summary = second.wait().await?;
    assert_eq!(summary.termination, RunTermination::Completed);
    assert_eq!(summary.blocked, 1);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_ending_session_cancels_runs() -> Result<()> {
    let directory = Arc::new(
        InMemoryDirectoryService::new(10).with_followers(&target(), identities(&["a", "b"])),
    );
    let client = TestClient::new(directory).await;
    client.relationships.rate_limit_after(1, None);

    let handle =
        client
            .bulk_block
            .start_run(&target(), RelationType::Followers, client.events.clone())?;
    client
        .wait_for_event(|event| matches!(event, ProgressEvent::RateLimit { .. }))
        .await;

    client.session.end_session().await;

    assert_eq!(handle.wait().await?.termination, RunTermination::Cancelled);
    assert_eq!(client.connected_account(), None);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_failed_targets_do_not_stop_the_run() -> Result<()> {
    let directory = Arc::new(
        InMemoryDirectoryService::new(10).with_followers(&target(), identities(&["a", "b", "c"])),
    );
    let client = TestClient::new(directory).await;

    let failure = BlockOutcome::Failed {
        status: Some(400),
        message: "Subject deleted".to_string(),
    };
    client
        .relationships
        .script(&user_id!("did:plc:b"), vec![failure.clone(), failure.clone(), failure]);

    let summary = client
        .bulk_block
        .block_relations(
            &target(),
            RelationType::Followers,
            client.events.clone(),
            CancellationToken::new(),
        )
        .await?;

    assert_eq!((summary.blocked, summary.failed), (2, 1));
    assert!(summary.describe().contains("1 could not be blocked"));
    assert_monotonic_progress(&client.events.events());

    Ok(())
}
