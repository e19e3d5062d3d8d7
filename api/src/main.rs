use anyhow::Context;
use api::{
    Config, build,
    store::Store,
    telemetry::{get_subscriber, init_subscriber},
};

/// Admin API server backed by an in-memory store.
///
/// Environment variables can be set directly or loaded from a .env file in
/// the project root.
///
/// - ADMIN_PHONE, ADMIN_PASSWORD: the admin account (required)
/// - IP_ADDRESS: bind address, defaults to 127.0.0.1
/// - PORT: defaults to 8000
/// - ALLOWED_ORIGINS: "*" for any origin, or a comma-separated list
///
/// Example:
/// ADMIN_PHONE=9999999999 ADMIN_PASSWORD=admin cargo run -p api
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if available
    let _ = dotenvy::dotenv();

    init_subscriber(get_subscriber("info".into()))?;

    let mut config = Config::from_env()
        .context("ADMIN_PHONE and ADMIN_PASSWORD must be set")?;
    let store = Store::new(config.admin.clone());

    let server = build(&mut config, store)?;
    tracing::info!("listening on {}:{}", config.ip, config.port);
    server.await?;
    Ok(())
}
