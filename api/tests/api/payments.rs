use payloads::PagedResult;
use payloads::forms::{CommissionForm, RechargeForm, UpiForm};
use payloads::requests::{ImageUpload, QR_MAX_FILES, UpiDetails};
use payloads::responses::CommissionRates;
use payloads::{PageRequest, UpiRecordId};
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{assert_rejected, assert_status_code, png, spawn_app};

#[tokio::test]
async fn commission_rates_round_trip() -> anyhow::Result<()> {
    let app = spawn_app().await;
    assert_eq!(app.client.get_commission().await?, CommissionRates::default());

    let form = CommissionForm {
        level1: "12".into(),
        level2: "6.5".into(),
        level3: "1".into(),
    };
    let message = app.client.update_commission(&form.validate()?).await?;
    assert_eq!(message, "Commission Updated Successfully!");

    let rates = app.client.get_commission().await?;
    assert_eq!(rates.level2, dec!(6.5));
    assert_eq!(CommissionForm::from_rates(&rates), form);

    let negative = CommissionRates {
        level1: dec!(-1),
        ..rates
    };
    assert_status_code(
        app.client.update_commission(&negative).await,
        StatusCode::BAD_REQUEST,
    );

    Ok(())
}

#[tokio::test]
async fn saved_upi_appears_after_refetch() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let first = PageRequest::first(10);
    let before =
        PagedResult::paginate_locally(app.client.list_upis().await?, &first);
    assert_eq!(before.total, 0);

    let mut form = UpiForm {
        upi_id: "shop@upi".into(),
        payee_name: "Shop Payments".into(),
    };
    let created = app.client.create_upi(&form.validate()?).await?;
    form = UpiForm::default();
    assert!(form.validate().is_err());

    let after =
        PagedResult::paginate_locally(app.client.list_upis().await?, &first);
    assert_eq!(after.total, before.total + 1);
    assert!(after.items.iter().any(|u| u.id == created.id));

    assert_rejected(
        app.client
            .create_upi(&UpiDetails {
                upi_id: "shop@upi".into(),
                payee_name: "Someone Else".into(),
            })
            .await,
        "UPI ID already exists",
    );
    assert_eq!(app.client.list_upis().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn upi_edit_and_delete() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let shop = app
        .client
        .create_upi(&UpiDetails {
            upi_id: "shop@upi".into(),
            payee_name: "Shop".into(),
        })
        .await?;
    let backup = app
        .client
        .create_upi(&UpiDetails {
            upi_id: "backup@upi".into(),
            payee_name: "Backup".into(),
        })
        .await?;

    let mut form = UpiForm::from_record(&shop);
    form.payee_name = "Shop Payments".into();
    app.client.update_upi(&shop.id, &form.validate()?).await?;
    let fetched = app.client.get_upi(&shop.id).await?;
    assert_eq!(fetched.payee_name, "Shop Payments");
    assert_eq!(app.client.list_upis().await?.len(), 2);

    // taking another record's id is refused
    form.upi_id = backup.upi_id.clone();
    assert_rejected(
        app.client.update_upi(&shop.id, &form.validate()?).await,
        "UPI ID already exists",
    );

    app.client.delete_upi(&backup.id).await?;
    let remaining = app.client.list_upis().await?;
    assert_eq!(remaining, vec![fetched]);
    assert_status_code(
        app.client.get_upi(&UpiRecordId("missing".into())).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn recharge_panel_credits_by_phone() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let user = app.seed_users(2).remove(1);

    let form = RechargeForm {
        utr: " 4021 ".into(),
        amount: "150".into(),
        phone: user.phone.clone(),
    };
    let adjustment = app.client.add_recharge(&form.validate()?).await?;
    assert_eq!(adjustment.message, "Amount added successfully");
    assert_eq!(adjustment.balance, Some(dec!(350)));

    let missing_utr = RechargeForm {
        utr: String::new(),
        ..form.clone()
    };
    assert!(missing_utr.validate().is_err());

    let unknown = RechargeForm {
        phone: "9123456789".into(),
        ..form
    };
    assert_status_code(
        app.client.add_recharge(&unknown.validate()?).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn qr_images_can_be_managed() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let message = app
        .client
        .upload_qrs(&[png("paytm.png"), png("gpay.png")])
        .await?;
    assert_eq!(message, "Successfully uploaded 2 files!");

    let qrs = app.client.list_qrs().await?;
    assert_eq!(qrs.len(), 2);
    assert_eq!(qrs[0].filename, "gpay.png");

    app.client.replace_qr(&qrs[0].id, &png("phonepe.png")).await?;
    let qrs = app.client.list_qrs().await?;
    assert_eq!(qrs[0].filename, "phonepe.png");
    assert!(qrs[0].url.ends_with("phonepe.png"));

    app.client.delete_qr(&qrs[1].id).await?;
    assert_eq!(app.client.list_qrs().await?.len(), 1);
    assert_status_code(
        app.client.delete_qr(&qrs[1].id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn qr_upload_refuses_non_images() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let text = ImageUpload {
        file_name: "notes.txt".into(),
        mime_type: "text/plain".into(),
        bytes: b"not an image".to_vec(),
    };

    assert_status_code(
        app.client.upload_qrs(&[png("ok.png"), text]).await,
        StatusCode::BAD_REQUEST,
    );
    assert!(app.client.list_qrs().await?.is_empty());

    let too_many: Vec<_> = (0..=QR_MAX_FILES)
        .map(|i| png(&format!("qr-{i}.png")))
        .collect();
    assert_status_code(
        app.client.upload_qrs(&too_many).await,
        StatusCode::BAD_REQUEST,
    );

    Ok(())
}
