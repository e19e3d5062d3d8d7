pub mod routes;
pub mod store;
pub mod telemetry;

use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use payloads::requests::{QR_MAX_BYTES, QR_MAX_FILES};
use std::net::TcpListener;

use crate::store::{AdminAccount, Store};

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(config: &mut Config, store: Store) -> std::io::Result<Server> {
    let store = web::Data::new(store);

    // Clone config values for use in closure
    let allowed_origins = config.allowed_origins.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        let cors = if allowed_origins.iter().any(|o| o == "*") {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
        } else {
            let mut cors = Cors::default()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials();
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        // a full batch of QR images has to fit in memory at once
        let upload_limit = QR_MAX_FILES * QR_MAX_BYTES + 1024 * 1024;
        let multipart = MultipartFormConfig::default()
            .total_limit(upload_limit)
            .memory_limit(upload_limit);

        App::new()
            .wrap(cors)
            .service(routes::api_services())
            .service(routes::qr_services())
            .app_data(multipart)
            .app_data(store.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// List of allowed CORS origins. Use "*" to allow any origin
    /// (development only)
    pub allowed_origins: Vec<String>,
    /// The single admin account; subordinates are managed on its behalf.
    pub admin: AdminAccount,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let port = match var("PORT") {
            Ok(port) => port.parse()?,
            Err(_) => 8000,
        };

        Ok(Config {
            ip: var("IP_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            allowed_origins,
            admin: AdminAccount {
                phone: var("ADMIN_PHONE")?,
                password: var("ADMIN_PASSWORD")?,
            },
        })
    }
}
