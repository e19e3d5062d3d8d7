use payloads::GiftcodeId;
use payloads::forms::{GiftcodeForm, SocialLinksForm};
use payloads::requests::GiftcodeDetails;
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{assert_status_code, spawn_app};

#[tokio::test]
async fn social_links_lifecycle() -> anyhow::Result<()> {
    let app = spawn_app().await;
    assert!(app.client.list_social_links().await?.is_empty());

    let form = SocialLinksForm {
        telegram_username_link: "https://t.me/support".into(),
        telegram_group_link: "https://t.me/+group".into(),
    };
    app.client.create_social_links(&form.validate()?).await?;
    let links = app.client.list_social_links().await?;
    assert_eq!(links.len(), 1);
    assert_eq!(SocialLinksForm::from_links(&links[0]), form);

    let mut edit = SocialLinksForm::from_links(&links[0]);
    edit.telegram_group_link = "https://t.me/+announcements".into();
    app.client
        .update_social_links(&links[0].id, &edit.validate()?)
        .await?;
    let links = app.client.list_social_links().await?;
    assert_eq!(links[0].telegram_group_link, "https://t.me/+announcements");

    app.client.delete_social_links(&links[0].id).await?;
    assert!(app.client.list_social_links().await?.is_empty());
    assert_status_code(
        app.client.delete_social_links(&links[0].id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn giftcode_lifecycle() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let form = GiftcodeForm {
        code: "WELCOME50".into(),
        amount: "50".into(),
        usage_limit: "100".into(),
    };

    let created = app.client.create_giftcode(&form.validate()?).await?;
    assert_eq!(created.usage_limit, Some(100));
    assert_eq!(created.used_count, 0);
    assert_eq!(app.client.list_giftcodes().await?.len(), 1);

    let mut edit = GiftcodeForm::from_giftcode(&created);
    edit.amount = "75".into();
    edit.usage_limit = String::new();
    let updated = app
        .client
        .update_giftcode(&created.id, &edit.validate()?)
        .await?;
    assert_eq!(updated.amount, dec!(75));
    assert_eq!(updated.usage_limit, None);
    assert_eq!(app.client.get_giftcode(&created.id).await?, updated);

    app.client.delete_giftcode(&created.id).await?;
    assert!(app.client.list_giftcodes().await?.is_empty());
    assert_status_code(
        app.client.get_giftcode(&created.id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn giftcodes_are_validated() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let details = GiftcodeDetails {
        code: "SPRING".into(),
        amount: dec!(20),
        usage_limit: None,
    };
    app.client.create_giftcode(&details).await?;

    match app.client.create_giftcode(&details).await {
        Err(payloads::ClientError::APIError(status, message)) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Gift code 'SPRING' already exists");
        }
        other => panic!("expected duplicate code error, got {other:?}"),
    }

    let free = GiftcodeDetails {
        code: "FREE".into(),
        amount: dec!(0),
        usage_limit: None,
    };
    assert_status_code(
        app.client.create_giftcode(&free).await,
        StatusCode::BAD_REQUEST,
    );
    let renamed = GiftcodeDetails {
        code: "SUMMER".into(),
        ..details
    };
    assert_status_code(
        app.client
            .update_giftcode(&GiftcodeId("missing".into()), &renamed)
            .await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}
