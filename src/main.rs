//! Hunger Relief Backend
//!
//! REST backend for a food-donation matching service: donors list surplus
//! food, recipients request it, and a cookie session gates per-user views.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::JwtKeys;
use config::Config;
use db::Repository;

/// Body of the liveness route.
pub const LIVENESS_MESSAGE: &str = "Hunger-Relief is available here";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub keys: Arc<JwtKeys>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hunger Relief Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    let Some(secret) = config.secret_key.as_deref() else {
        tracing::error!("HR_SECRET_KEY is not set; refusing to start without a signing secret");
        return Err("HR_SECRET_KEY must be set".into());
    };
    let keys = Arc::new(JwtKeys::new(secret, config.token_ttl_secs));

    if config.cors_origins.is_empty() {
        tracing::warn!("No CORS origins configured (HR_CORS_ORIGINS). Allowing any origin without credentials!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    match repo.ping().await {
        Ok(()) => tracing::info!("Connected to store"),
        Err(e) => tracing::warn!("Store ping failed, serving anyway: {}", e),
    }

    // Create application state
    let state = AppState {
        repo: repo.clone(),
        keys,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Hunger-Relief listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repo.close().await;
    tracing::info!("Store connection closed");

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api_routes = Router::new()
        // Food listings
        .route("/foods", get(api::list_foods))
        .route(
            "/food",
            get(api::list_foods_by_donor).post(api::create_food),
        )
        .route(
            "/food/{id}",
            get(api::get_food)
                .put(api::replace_food)
                .delete(api::delete_food),
        )
        // Food requests
        .route(
            "/food-request",
            get(api::list_food_requests_by_requester).post(api::create_food_request),
        )
        .route(
            "/food-request/{id}",
            patch(api::update_food_request_status)
                .delete(api::delete_food_request),
        );

    Router::new()
        .route("/", get(liveness))
        .route("/jwt", post(api::issue_token))
        .route("/logout", post(api::logout))
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Explicit allow-list with credentials, or fully permissive when the list is empty.
///
/// Entries are checked when the config loads; one that still fails to
/// convert is left out, so a bad list never widens access.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

/// Liveness endpoint.
async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
