use payloads::paging::{Pager, TableBody};
use payloads::requests::{RegisterUser, SpinsUpdate, WithdrawLimitUpdate};
use payloads::{PageRequest, UserId};
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{assert_status_code, spawn_app};

#[tokio::test]
async fn twenty_five_users_make_three_pages() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users(25);
    let first = PageRequest::first(10);

    let page = app.client.list_users(&first).await?;
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);

    let last = app.client.list_users(&first.at_page(3)).await?;
    assert_eq!(last.items.len(), 5);

    // past the end: no rows, same counts
    let beyond = app.client.list_users(&first.at_page(4)).await?;
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 25);
    assert_eq!(beyond.total_pages, 3);

    Ok(())
}

#[tokio::test]
async fn pages_are_disjoint_and_newest_first() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let seeded = app.seed_users(25);
    let first = PageRequest::first(10);

    let mut seen: Vec<UserId> = Vec::new();
    for page in 1..=3 {
        let result = app.client.list_users(&first.at_page(page)).await?;
        seen.extend(result.items.into_iter().map(|u| u.id));
    }
    let expected: Vec<UserId> =
        seeded.into_iter().rev().map(|u| u.id).collect();
    assert_eq!(seen, expected);

    Ok(())
}

#[tokio::test]
async fn pager_boundaries_follow_the_server() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users(25);
    let first = PageRequest::first(10);

    let page = app.client.list_users(&first).await?;
    let pager = Pager::new(1, page.total_pages, Some(page.total), 10);
    assert!(pager.shows_controls());
    assert!(!pager.can_go_previous());
    assert!(pager.can_go_next());
    assert_eq!(pager.label(page.items.len()), "Showing 1 to 10 of 25");

    let page = app.client.list_users(&first.at_page(3)).await?;
    let pager = Pager::new(3, page.total_pages, Some(page.total), 10);
    assert!(pager.can_go_previous());
    assert!(!pager.can_go_next());
    assert_eq!(pager.next(), None);
    assert_eq!(pager.label(page.items.len()), "Showing 21 to 25 of 25");

    Ok(())
}

#[tokio::test]
async fn empty_listing_has_no_controls() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let page = app.client.list_users(&PageRequest::first(10)).await?;
    assert_eq!(page.total, 0);
    let pager = Pager::new(1, page.total_pages, Some(page.total), 10);
    assert!(!pager.shows_controls());
    assert_eq!(pager.body(false, page.items.len()), TableBody::Empty);

    Ok(())
}

#[tokio::test]
async fn delete_lowers_total_by_one() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let users = app.seed_users(25);
    let first = PageRequest::first(10);

    app.client.delete_user(&users[3].id).await?;

    let page = app.client.list_users(&first).await?;
    assert_eq!(page.total, 24);
    assert_eq!(page.total_pages, 3);
    assert_status_code(
        app.client.user_details(&users[3].id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn inline_updates_keep_total() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let users = app.seed_users(12);
    let first = PageRequest::first(10);
    let target = &users[11];

    let spins = app
        .client
        .update_spins(&target.id, &SpinsUpdate { spins_today: 7 })
        .await?;
    assert_eq!(spins, 7);
    let limit = app
        .client
        .update_withdraw_limit(
            &target.id,
            &WithdrawLimitUpdate { limit: dec!(2500) },
        )
        .await?;
    assert_eq!(limit, dec!(2500));

    let page = app.client.list_users(&first).await?;
    assert_eq!(page.total, 12);
    let row = page.items.iter().find(|u| u.id == target.id).unwrap();
    assert_eq!(row.lucky_spin.spins_today, 7);
    assert_eq!(row.withdraw_limit, dec!(2500));

    Ok(())
}

#[tokio::test]
async fn negative_withdraw_limit_is_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let users = app.seed_users(1);

    let result = app
        .client
        .update_withdraw_limit(
            &users[0].id,
            &WithdrawLimitUpdate { limit: dec!(-1) },
        )
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn registered_demo_accounts_are_filtered() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users(3);
    let register = |phone: &str| RegisterUser {
        phone: phone.to_string(),
        password: "demo1234".to_string(),
        trade_password: "demo1234".to_string(),
        ref_code: String::new(),
    };

    app.client.register_user(&register("5000000001")).await?;
    app.client.register_user(&register("5000000002")).await?;
    assert_status_code(
        app.client.register_user(&register("5000000001")).await,
        StatusCode::BAD_REQUEST,
    );

    let demo = PageRequest::first(10).with_filter("isDemo", "true");
    let page = app.client.list_users(&demo).await?;
    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|u| u.is_demo));

    let all = app.client.list_users(&PageRequest::first(10)).await?;
    assert_eq!(all.total, 5);

    Ok(())
}

#[tokio::test]
async fn search_matches_phone_fragments() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let users = app.seed_users(25);

    let found = app.client.search_users("0000002").await?;
    // 9000000002 and 9000000020..24
    assert_eq!(found.len(), 6);
    let by_id = app.client.search_users(&users[7].id.0).await?;
    assert_eq!(by_id.len(), 1);
    assert!(app.client.search_users("  ").await?.is_empty());

    Ok(())
}
