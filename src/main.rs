use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use faqbot::config::{LoggingSettings, Settings};
use faqbot::error::handle_json_payload_error;
use faqbot::routes::{self, AppState};
use faqbot::services::{bootstrap, FaqStore, MemoryStore, PostgresClient};
use std::io;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(settings: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| startup_error("Configuration error", e))?;

    init_logging(&settings.logging);

    info!("Starting FAQBot...");

    let store: Arc<dyn FaqStore> = if settings.database.is_memory() {
        warn!("Using in-memory store; FAQ changes are lost on restart");
        Arc::new(MemoryStore::new())
    } else {
        let postgres = PostgresClient::from_settings(&settings.database)
            .await
            .map_err(|e| startup_error("PostgreSQL connection error", e))?;
        info!("PostgreSQL client initialized");
        Arc::new(postgres)
    };

    let report = bootstrap(store.as_ref(), &settings.auth)
        .await
        .map_err(|e| startup_error("Bootstrap error", e))?;
    info!(
        "Bootstrap complete (admin created: {}, FAQs seeded: {})",
        report.admin_created, report.faqs_seeded
    );

    let app_state = AppState::new(store, &settings);

    info!(
        "Matcher initialized with weights: {:?}, threshold: {}",
        app_state.matcher.weights(),
        app_state.matcher.threshold()
    );

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
