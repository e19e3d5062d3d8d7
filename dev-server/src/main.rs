//! Development server for admin panel UI development
//!
//! Starts the in-memory API on a fixed port and fills it with a dataset that
//! exercises every page of the panel: enough users for several pages, a
//! referral tree three levels deep, histories, products and payment setup.
//!
//! Usage: cargo run -p dev-server

use anyhow::Result;
use test_helpers::mock::DevDataset;
use test_helpers::{ADMIN_PASSWORD, ADMIN_PHONE};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let subscriber = api::telemetry::get_subscriber("info".into());
    api::telemetry::init_subscriber(subscriber)?;

    info!("🚀 Starting admin panel development server");

    let port = match std::env::var("PORT") {
        Ok(port) => port.parse()?,
        Err(_) => 8000,
    };
    let app = test_helpers::spawn_app_on_port(port).await;

    info!("✅ API server running on http://127.0.0.1:{}", app.port);

    info!("📊 Setting up development data...");
    let dataset = DevDataset::create(&app).await?;

    info!("🎯 Development server ready!");
    info!("   API: http://127.0.0.1:{}", app.port);
    info!(
        "   UI:  cd ui && BACKEND_URL=http://127.0.0.1:{} trunk serve",
        app.port
    );
    info!("   Admin login: {ADMIN_PHONE} / {ADMIN_PASSWORD}");
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}
