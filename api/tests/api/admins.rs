use payloads::forms::{AdminCredentialsForm, LoginForm, SubordinateForm};
use payloads::requests::{AdminCredentials, LoginCredentials};
use payloads::session::LoginType;
use reqwest::StatusCode;
use test_helpers::{
    ADMIN_PHONE, admin_credentials, admin_login, assert_status_code,
    spawn_app,
};

#[tokio::test]
async fn admin_login_checks_password() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let message = app.client.login(LoginType::Admin, &admin_login()).await?;
    assert_eq!(message, "Login successful");

    let wrong = LoginCredentials {
        phone: ADMIN_PHONE.to_string(),
        password: "guess".to_string(),
    };
    assert_status_code(
        app.client.login(LoginType::Admin, &wrong).await,
        StatusCode::UNAUTHORIZED,
    );

    // the admin is not a subordinate of itself
    assert_status_code(
        app.client.login(LoginType::Subordinate, &admin_login()).await,
        StatusCode::UNAUTHORIZED,
    );

    Ok(())
}

#[tokio::test]
async fn subordinate_lifecycle() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = AdminCredentialsForm {
        phone: ADMIN_PHONE.to_string(),
        password: admin_credentials().admin_password,
    }
    .validate()?;
    assert!(app.client.list_subordinates(&admin).await?.is_empty());

    let form = SubordinateForm {
        phone: "9111111111".into(),
        password: "first-pass".into(),
    };
    app.client
        .create_subordinate(&form.validate_create(&admin)?)
        .await?;
    let subordinates = app.client.list_subordinates(&admin).await?;
    assert_eq!(subordinates.len(), 1);
    assert_eq!(subordinates[0].phone, "9111111111");
    assert_eq!(subordinates[0].user_type, "subordinate");

    let login = LoginForm {
        phone: "9111111111".into(),
        password: "first-pass".into(),
        login_type: LoginType::Subordinate,
    };
    app.client
        .login(LoginType::Subordinate, &login.validate()?)
        .await?;

    let change_password = SubordinateForm {
        phone: String::new(),
        password: "second-pass".into(),
    };
    app.client
        .update_subordinate(
            &subordinates[0].id,
            &change_password.validate_update(&admin)?,
        )
        .await?;
    assert_status_code(
        app.client
            .login(LoginType::Subordinate, &login.validate()?)
            .await,
        StatusCode::UNAUTHORIZED,
    );

    app.client
        .delete_subordinate(&subordinates[0].id, &admin)
        .await?;
    assert!(app.client.list_subordinates(&admin).await?.is_empty());
    assert_status_code(
        app.client
            .delete_subordinate(&subordinates[0].id, &admin)
            .await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn subordinates_need_admin_credentials() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let impostor = AdminCredentials {
        admin_phone: ADMIN_PHONE.to_string(),
        admin_password: "not-it".to_string(),
    };

    assert_status_code(
        app.client.list_subordinates(&impostor).await,
        StatusCode::UNAUTHORIZED,
    );
    let form = SubordinateForm {
        phone: "9222222222".into(),
        password: "pass".into(),
    };
    assert_status_code(
        app.client
            .create_subordinate(&form.validate_create(&impostor)?)
            .await,
        StatusCode::UNAUTHORIZED,
    );

    // phones are unique across the admin and its subordinates
    let admin = admin_credentials();
    app.client
        .create_subordinate(&form.validate_create(&admin)?)
        .await?;
    assert_status_code(
        app.client
            .create_subordinate(&form.validate_create(&admin)?)
            .await,
        StatusCode::BAD_REQUEST,
    );
    let taken = SubordinateForm {
        phone: ADMIN_PHONE.to_string(),
        password: "pass".into(),
    };
    assert_status_code(
        app.client
            .create_subordinate(&taken.validate_create(&admin)?)
            .await,
        StatusCode::BAD_REQUEST,
    );

    Ok(())
}
