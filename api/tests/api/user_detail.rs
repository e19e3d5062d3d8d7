use api::store::NewUser;
use payloads::forms::{FormError, MinusForm};
use payloads::requests::{AddRecharge, MinusRecharge};
use payloads::{ClientError, PageRequest, TeamLevel};
use reqwest::StatusCode;
use rust_decimal::{Decimal, dec};
use test_helpers::{assert_status_code, spawn_app};

#[tokio::test]
async fn team_levels_page_independently() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let chain = app.seed_referral_chain(3);
    let root = &chain[0];
    for i in 0..11 {
        app.store.insert_user(NewUser {
            phone: format!("70{i:08}"),
            referred_by: Some(root.id.clone()),
            ..Default::default()
        });
    }
    let first = PageRequest::first(10);

    let team1 = app
        .client
        .user_team(&root.id, TeamLevel::Team1, &first)
        .await?;
    assert_eq!(team1.total, 12);
    assert_eq!(team1.total_pages, 2);
    assert_eq!(team1.items.len(), 10);
    let team1_last = app
        .client
        .user_team(&root.id, TeamLevel::Team1, &first.at_page(2))
        .await?;
    assert_eq!(team1_last.items.len(), 2);

    let team2 = app
        .client
        .user_team(&root.id, TeamLevel::Team2, &first)
        .await?;
    assert_eq!(team2.total, 1);
    assert_eq!(team2.items[0].ids, vec![chain[2].id.clone()]);

    let team3 = app
        .client
        .user_team(&root.id, TeamLevel::Team3, &first)
        .await?;
    assert_eq!(team3.items[0].ids, vec![chain[3].id.clone()]);

    Ok(())
}

#[tokio::test]
async fn histories_are_paginated() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let user = app.seed_users(1).remove(0);
    for n in 1..=12 {
        app.store
            .record_purchase(&user.id, "Starter", Decimal::from(n))?;
    }
    app.store.record_withdrawal(&user.id, dec!(40), "pending")?;
    let first = PageRequest::first(10);

    let purchases = app.client.user_purchases(&user.id, &first).await?;
    assert_eq!(purchases.total, 12);
    assert_eq!(purchases.total_pages, 2);
    // newest first
    assert_eq!(purchases.items[0].amount, dec!(12));
    let rest = app
        .client
        .user_purchases(&user.id, &first.at_page(2))
        .await?;
    assert_eq!(rest.items.len(), 2);

    let withdrawals = app.client.user_withdrawals(&user.id, &first).await?;
    assert_eq!(withdrawals.total, 1);
    assert_eq!(withdrawals.items[0].status, "pending");

    let details = app.client.user_details(&user.id).await?;
    assert_eq!(details.total_buy, dec!(78));

    Ok(())
}

#[tokio::test]
async fn recharge_appears_in_history() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let user = app.seed_users(1).remove(0);
    let first = PageRequest::first(10);
    assert_eq!(app.client.user_recharges(&user.id, &first).await?.total, 0);

    let adjustment = app
        .client
        .add_recharge(&AddRecharge {
            utr: "UTR0001".to_string(),
            amount: dec!(250),
            phone: user.phone.clone(),
        })
        .await?;
    assert_eq!(adjustment.balance, Some(user.balance + dec!(250)));

    let recharges = app.client.user_recharges(&user.id, &first).await?;
    assert_eq!(recharges.total, 1);
    assert_eq!(recharges.items[0].utr.as_deref(), Some("UTR0001"));

    Ok(())
}

#[tokio::test]
async fn minus_at_known_balance_is_blocked() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let user = app.seed_users(1).remove(0);
    let balance = app.client.user_details(&user.id).await?.balance;
    assert_eq!(balance, dec!(100));

    let form = MinusForm {
        amount: "100".to_string(),
        phone: user.phone.clone(),
    };
    assert_eq!(
        form.validate(Some(balance)),
        Err(FormError::ExceedsBalance(balance))
    );
    assert_eq!(app.client.user_details(&user.id).await?.balance, balance);

    let form = MinusForm {
        amount: "99.50".to_string(),
        phone: user.phone.clone(),
    };
    let request = form.validate(Some(balance))?;
    let adjustment = app.client.minus_recharge(&request).await?;
    assert_eq!(adjustment.balance, Some(dec!(0.50)));

    Ok(())
}

#[tokio::test]
async fn server_refuses_overdraft() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let user = app.seed_users(1).remove(0);

    let result = app
        .client
        .minus_recharge(&MinusRecharge {
            amount: dec!(100.01),
            phone: user.phone.clone(),
        })
        .await;
    match result {
        Err(ClientError::APIError(StatusCode::BAD_REQUEST, message)) => {
            assert_eq!(message, "Insufficient balance")
        }
        other => panic!("expected insufficient balance, got {other:?}"),
    }

    assert_status_code(
        app.client
            .minus_recharge(&MinusRecharge {
                amount: dec!(1),
                phone: "9999990000".to_string(),
            })
            .await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}
