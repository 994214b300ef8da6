// blockade/blockade-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use futures::StreamExt;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

use blockade_core::dtos::{ProgressEvent, RelationType, RunTermination};
use blockade_core::test::InMemoryDirectoryService;
use blockade_core::{
    decode_event, encode_event, identity, user_id, CallbackEventSink, ChannelEventSink,
};

use super::helpers::TestClient;

#[tokio::test(start_paused = true)]
async fn test_streams_events_until_terminal_event() -> Result<()> {
    let target = user_id!("did:plc:target");
    let client = TestClient::new(Arc::new(
        InMemoryDirectoryService::new(10)
            .with_following(&target, vec![identity!("a"), identity!("b")]),
    ))
    .await;

    let (sink, mut events) = ChannelEventSink::new();
    let handle = client
        .bulk_block
        .start_run(&target, RelationType::Following, Arc::new(sink))?;

    let mut received = vec![];
    while let Some(event) = events.next().await {
        let is_terminal = event.is_terminal();
        received.push(event);
        if is_terminal {
            break;
        }
    }

    assert_eq!(
        received,
        vec![
            ProgressEvent::status("Loading the following of did:plc:target…"),
            ProgressEvent::status("Found 2 following. Blocking 2, skipping 0."),
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
                skip_reasons: Default::default(),
            },
        ]
    );
    assert_eq!(
        handle.wait().await?.termination,
        RunTermination::Completed
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_callback_sink_produces_ndjson() -> Result<()> {
    let target = user_id!("did:plc:target");
    let client = TestClient::new(Arc::new(
        InMemoryDirectoryService::new(10).with_followers(&target, vec![identity!("a")]),
    ))
    .await;

    let lines = Arc::new(Mutex::new(String::new()));
    let sink = CallbackEventSink::new({
        let lines = lines.clone();
        move |event: ProgressEvent| {
            if let Ok(line) = encode_event(&event) {
                lines.lock().push_str(&line);
            }
        }
    });

    client
        .bulk_block
        .block_relations(
            &target,
            RelationType::Followers,
            Arc::new(sink),
            CancellationToken::new(),
        )
        .await?;

    let body = lines.lock().clone();
    let events = body
        .lines()
        .map(decode_event)
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], ProgressEvent::Status { .. }));
    assert!(events[3].is_terminal());
    assert!(body.contains(r#""type":"complete""#));
    assert!(body.contains(r#""skipReasons":{"#));

    Ok(())
}
