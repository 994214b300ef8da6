// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use pretty_assertions::assert_eq;

use blockade_core::domain::directory::models::{Listing, Page};
use blockade_core::domain::directory::services::impls::PaginatedSetFetcher;
use blockade_core::domain::directory::services::mocks::MockDirectoryService;
use blockade_core::domain::shared::models::Identity;
use blockade_core::test::InMemoryDirectoryService;
use blockade_core::{identity, user_id};

fn identities(names: &[&str]) -> Vec<Identity> {
    names.iter().map(|name| identity!(name)).collect()
}

#[tokio::test]
async fn test_drains_all_pages_in_order() -> Result<()> {
    let target = user_id!("did:plc:target");
    let directory = InMemoryDirectoryService::new(2)
        .with_followers(&target, identities(&["a", "b", "c", "d", "e"]));

    let set = PaginatedSetFetcher::new(&directory, 100)
        .drain(Listing::Followers, &target)
        .await?;

    assert_eq!(set.identities, identities(&["a", "b", "c", "d", "e"]));
    assert!(!set.truncated);
    assert_eq!(directory.request_count(Listing::Followers), 3);

    Ok(())
}

#[tokio::test]
async fn test_returns_empty_set_for_empty_listing() -> Result<()> {
    let target = user_id!("did:plc:target");
    let directory = InMemoryDirectoryService::new(10);

    let set = PaginatedSetFetcher::new(&directory, 100)
        .drain(Listing::Following, &target)
        .await?;

    assert!(set.is_empty());
    assert!(!set.truncated);

    Ok(())
}

#[tokio::test]
async fn test_stops_at_page_limit() -> Result<()> {
    let target = user_id!("did:plc:target");
    let directory = InMemoryDirectoryService::new(1)
        .with_followers(&target, identities(&["a", "b", "c", "d"]));

    let set = PaginatedSetFetcher::new(&directory, 2)
        .drain(Listing::Followers, &target)
        .await?;

    assert_eq!(set.identities, identities(&["a", "b"]));
    assert!(set.truncated);
    assert_eq!(directory.request_count(Listing::Followers), 2);

    Ok(())
}

#[tokio::test]
async fn test_fails_if_first_page_fails() {
    let target = user_id!("did:plc:target");
    let directory =
        InMemoryDirectoryService::new(2).with_followers(&target, identities(&["a", "b", "c"]));
    directory.fail_page(Listing::Followers, &target, 0);

    let result = PaginatedSetFetcher::new(&directory, 100)
        .drain(Listing::Followers, &target)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_keeps_partial_results_if_later_page_fails() -> Result<()> {
    let target = user_id!("did:plc:target");
    let directory = InMemoryDirectoryService::new(2)
        .with_followers(&target, identities(&["a", "b", "c", "d", "e"]));
    directory.fail_page(Listing::Followers, &target, 1);

    let set = PaginatedSetFetcher::new(&directory, 100)
        .drain(Listing::Followers, &target)
        .await?;

    assert_eq!(set.identities, identities(&["a", "b"]));
    assert!(set.truncated);

    Ok(())
}

#[tokio::test]
async fn test_deduplicates_by_id_and_stops_on_repeated_cursor() -> Result<()> {
    let mut directory = MockDirectoryService::new();
    directory
        .expect_list_followers()
        .times(3)
        .returning(|_, cursor| {
            let page = match cursor.as_ref().map(|c| c.as_str()) {
                None => Page::with_cursor(
                    vec![identity!("a"), identity!("b")],
                    "cursor-1",
                ),
                Some("cursor-1") => Page::with_cursor(
                    vec![
                        // Same id, renamed handle.
                        Identity::new("did:plc:b", "b-renamed.test"),
                        identity!("c"),
                    ],
                    "cursor-2",
                ),
                Some("cursor-2") => Page::with_cursor(vec![identity!("d")], "cursor-1"),
                _ => unreachable!(),
            };
            Box::pin(async move { Ok(page) })
        });

    let set = PaginatedSetFetcher::new(&directory, 100)
        .drain(Listing::Followers, &user_id!("did:plc:target"))
        .await?;

    assert_eq!(set.identities, identities(&["a", "b", "c", "d"]));
    assert_eq!(set.identities[1].handle.as_str(), "b.test");
    assert!(!set.truncated);

    Ok(())
}
