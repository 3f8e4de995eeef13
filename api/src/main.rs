use api::auth::{TOKEN_HEADER, middleware::log_request};
use api::routes::app_router;
use axum::{
    http::{
        HeaderName, HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware::from_fn,
};
use migration::{Migrator, MigratorTrait};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_appender::rolling;
use util::{config, state::AppState, storage::MediaStorage};

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let _log_guard = init_logging(&config::log_file(), &config::log_level());

    if config::jwt_secret().trim().is_empty() {
        tracing::error!("JWT_SECRET is not set; refusing to start");
        std::process::exit(1);
    }

    // Set up dependencies
    let db = db::connect().await.expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    let storage = MediaStorage::from_config();
    util::storage::ensure_dir(storage.root()).expect("Failed to create media storage root");

    let app_state = AppState::new(db, storage);

    // Build app router
    let app = app_router(app_state)
        .layer(from_fn(log_request))
        .layer(cors_layer());

    // Start server
    let addr: SocketAddr = format!("{}:{}", config::host(), config::port())
        .parse()
        .expect("Invalid address");

    tracing::info!(
        "Starting {} on http://{}:{}",
        config::project_name(),
        config::host(),
        config::port()
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}

/// Storefront and admin panel origins when configured, any origin otherwise.
fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = [config::frontend_url(), config::admin_url()]
        .into_iter()
        .filter(|url| !url.trim().is_empty())
        .filter_map(|url| HeaderValue::from_str(url.trim_end_matches('/')).ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("FRONTEND_URL and ADMIN_URL unset; allowing any origin");
        return CorsLayer::very_permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static(TOKEN_HEADER),
        ])
        .allow_credentials(true)
}

fn init_logging(log_file: &str, log_level: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true);

    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("api=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config::log_to_stdout() {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
