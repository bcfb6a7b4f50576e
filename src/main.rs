//! Valentine Week Backend
//!
//! A small REST backend serving day pages, photos and site settings from an in-memory store.

mod api;
mod auth;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::ContentStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ContentStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Valentine Week Backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.uses_default_secret() {
        tracing::warn!(
            "Using the built-in admin secret (set VALENTINE_ADMIN_SECRET to change it)"
        );
    }

    let store = Arc::new(ContentStore::new());
    if config.seed_on_start {
        let pages = store.ensure_initialized(false)?;
        tracing::info!("Content store seeded with {} pages", pages);
    }

    // Create application state
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the secret for the auth layer
    let secret = state.config.admin_secret.clone();

    // Reads are open to everyone
    let public_routes = Router::new()
        .route("/valentine-pages", get(api::list_pages))
        .route("/valentine-pages/{id}", get(api::get_page))
        .route("/valentine-pages/{id}/photos", get(api::list_page_photos))
        .route("/site-settings", get(api::get_site_settings));

    // Mutations require the admin secret
    let admin_routes = Router::new()
        .route("/valentine-pages", post(api::create_page))
        .route(
            "/valentine-pages/{id}",
            put(api::update_page).delete(api::delete_page),
        )
        .route("/page-photos", post(api::create_photo))
        .route(
            "/page-photos/{id}",
            put(api::update_photo).delete(api::delete_photo),
        )
        .route("/site-settings", put(api::update_site_settings))
        .route("/seed-pages", post(api::seed_pages))
        .route_layer(middleware::from_fn(move |req, next| {
            auth::admin_secret_layer(secret.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
