mod admins;
mod content;
mod payments;
mod products;
mod user_detail;
mod users;

use test_helpers::spawn_app;

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.health_check().await?;

    Ok(())
}

#[tokio::test]
async fn dev_dataset_builds() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let dataset = test_helpers::mock::DevDataset::create(&app).await?;
    assert_eq!(dataset.users.len(), 25);
    assert_eq!(app.client.list_products().await?.len(), 3);
    assert_eq!(app.client.list_qrs().await?.len(), 2);

    Ok(())
}
