use payloads::forms::ProductForm;
use payloads::responses::{Badge, CycleType};
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{assert_status_code, png, spawn_app};

fn starter_form() -> ProductForm {
    ProductForm {
        name: "Starter Plot".into(),
        price: "500".into(),
        cycle_value: "30".into(),
        daily: "25".into(),
        badge: Badge::New,
        explanation: vec![
            "Daily income".into(),
            "  ".into(),
            "Withdraw any time".into(),
        ],
        image: Some(png("starter.png")),
        ..Default::default()
    }
}

#[tokio::test]
async fn created_product_is_listed() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let product = app
        .client
        .create_product(&starter_form().validate()?)
        .await?;
    assert_eq!(product.product_name, "Starter Plot");
    assert_eq!(product.price, dec!(500));
    assert_eq!(product.cycle_type, CycleType::Day);
    assert_eq!(product.hour, dec!(0));
    assert_eq!(product.badge, Badge::New);
    assert_eq!(
        product.product_explanation,
        vec!["Daily income", "Withdraw any time"]
    );
    let image_url = product.image_url.clone().unwrap_or_default();
    assert!(image_url.ends_with("starter.png"));

    let listed = app.client.list_products().await?;
    assert_eq!(listed, vec![product]);

    Ok(())
}

#[tokio::test]
async fn update_without_image_keeps_it() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let product = app
        .client
        .create_product(&starter_form().validate()?)
        .await?;

    let mut form = ProductForm::from_product(&product);
    assert_eq!(form.image, None);
    form.price = "650".into();
    form.cycle_type = CycleType::Hour;
    form.hour = "1.5".into();
    let updated = app
        .client
        .update_product(&product.id, &form.validate()?)
        .await?;
    assert_eq!(updated.price, dec!(650));
    assert_eq!(updated.cycle_type, CycleType::Hour);
    assert_eq!(updated.image_url, product.image_url);

    form.image = Some(png("replacement.png"));
    let replaced = app
        .client
        .update_product(&product.id, &form.validate()?)
        .await?;
    assert_ne!(replaced.image_url, product.image_url);
    assert_eq!(app.client.get_product(&product.id).await?, replaced);

    Ok(())
}

#[tokio::test]
async fn deleted_product_is_gone() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let product = app
        .client
        .create_product(&starter_form().validate()?)
        .await?;

    app.client.delete_product(&product.id).await?;
    assert!(app.client.list_products().await?.is_empty());
    assert_status_code(
        app.client.get_product(&product.id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn incomplete_product_is_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let mut details = starter_form().validate()?;
    details.product_name = String::new();

    match app.client.create_product(&details).await {
        Err(payloads::ClientError::APIError(status, message)) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Please fill all required fields!");
        }
        other => panic!("expected a bad request, got {other:?}"),
    }

    let mut details = starter_form().validate()?;
    details.image = Some(payloads::requests::ImageUpload {
        file_name: "brochure.pdf".into(),
        mime_type: "application/pdf".into(),
        bytes: vec![b'%', b'P', b'D', b'F'],
    });
    assert_status_code(
        app.client.create_product(&details).await,
        StatusCode::BAD_REQUEST,
    );
    assert!(app.client.list_products().await?.is_empty());

    Ok(())
}
