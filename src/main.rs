//! Exam Portal Server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use exam_portal_lib::api::{self, ApiDoc};
use exam_portal_lib::auth::{AdminKey, SessionKeys};
use exam_portal_lib::config::{Config, StoreBackend};
use exam_portal_lib::db::DbPool;
use exam_portal_lib::lifecycle::{SharedClock, SystemClock};
use exam_portal_lib::middleware::RequestLogger;
use exam_portal_lib::services::start_reaper_task;
use exam_portal_lib::store::{MemoryStore, SharedStore};

/// Perform health check (for Docker healthcheck).
fn health_check() -> bool {
    Config::from_env().is_ok()
}

async fn open_store(config: &Config) -> std::io::Result<SharedStore> {
    match config.store {
        StoreBackend::Postgres => {
            let pool = DbPool::new(config)
                .await
                .map_err(|e| std::io::Error::other(format!("Failed to connect to database: {}", e)))?;
            info!("Database connection established");

            pool.run_migrations()
                .await
                .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {}", e)))?;

            Ok(Arc::new(pool))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store - all data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    if std::env::args().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        std::process::exit(if health_check() { 0 } else { 1 });
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(std::io::Error::other)?;

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL and PORTAL_SESSION_SECRET must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Exam Portal Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
        info!("Using development defaults for DATABASE_URL, admin key and session secret");
    }

    let store = open_store(&config).await?;
    let clock: SharedClock = Arc::new(SystemClock::with_offset_minutes(config.utc_offset_minutes));
    info!(
        "Local day reference: UTC{:+} minutes, today is {}",
        config.utc_offset_minutes,
        clock.today()
    );

    start_reaper_task(store.clone(), clock.clone(), config.reaper_interval_secs);

    // Prepare shared state
    let bind_address = config.bind_address();
    let admin_key = AdminKey::new(config.admin_key.clone());
    let session_keys = SessionKeys::new(config.session_secret.clone(), config.session_ttl_secs);
    let is_development = config.is_development();
    let openapi = ApiDoc::openapi();

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
                header::HeaderName::from_static("x-admin-key"),
            ])
            .max_age(3600);
        // Same-origin only in production
        let cors = if is_development {
            cors.allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
        } else {
            cors
        };

        App::new()
            // Add CORS middleware (must be before other middleware)
            .wrap(cors)
            .wrap(RequestLogger)
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(clock.clone()))
            .app_data(web::Data::new(admin_key.clone()))
            .app_data(web::Data::new(session_keys.clone()))
            .service(web::scope("/api/v1").configure(api::configure_routes))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    });

    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
