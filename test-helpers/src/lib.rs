pub mod mock;

use api::store::{AdminAccount, NewUser, Store};
use api::{Config, telemetry};
use payloads::requests::{AdminCredentials, ImageUpload, LoginCredentials};
use payloads::responses::User;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub const ADMIN_PHONE: &str = "9999999999";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    /// Direct handle on the server's store, for seeding and inspection.
    pub store: Store,
    pub client: payloads::APIClient,
}

impl TestApp {
    /// Insert `count` plain users straight into the store, oldest first.
    /// Phones are `90000000NN`.
    pub fn seed_users(&self, count: usize) -> Vec<User> {
        (0..count)
            .map(|i| {
                self.store.insert_user(NewUser {
                    phone: format!("90{i:08}"),
                    balance: Decimal::from(100 * (i as u64 + 1)),
                    ..Default::default()
                })
            })
            .collect()
    }

    /// A user whose referral chain is `depth` levels deep: a referrer at
    /// every level below it, one member per level.
    pub fn seed_referral_chain(&self, depth: usize) -> Vec<User> {
        let mut chain: Vec<User> = Vec::new();
        for i in 0..=depth {
            let user = self.store.insert_user(NewUser {
                phone: format!("80{i:08}"),
                referred_by: chain.last().map(|u| u.id.clone()),
                ..Default::default()
            });
            chain.push(user);
        }
        chain
    }
}

pub fn admin_credentials() -> AdminCredentials {
    AdminCredentials {
        admin_phone: ADMIN_PHONE.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
    }
}

pub fn admin_login() -> LoginCredentials {
    LoginCredentials {
        phone: ADMIN_PHONE.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    }
}

/// A tiny PNG. The server only looks at the name and mime type.
pub fn png(file_name: &str) -> ImageUpload {
    ImageUpload {
        file_name: file_name.to_string(),
        mime_type: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let admin = AdminAccount {
        phone: ADMIN_PHONE.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    };
    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
        allowed_origins: vec!["*".to_string()],
        admin: admin.clone(),
    };
    let store = Store::new(admin);

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let server = api::build(&mut config, store.clone()).unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        store,
        client: payloads::APIClient {
            address: format!("http://127.0.0.1:{}", config.port),
            inner_client: client,
        },
    }
}

/// Spawn the api on an OS-assigned port with an empty store.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}

/// Assert that the server answered `success: false` with this message.
pub fn assert_rejected<T>(
    result: Result<T, payloads::ClientError>,
    expected: &str,
) {
    match result {
        Err(payloads::ClientError::Rejected(message)) => {
            assert_eq!(message, expected)
        }
        _ => panic!("Expected a rejected envelope"),
    };
}
