pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod static_files;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::AppConfig;
pub use db::{DbError, DbPool};

use routes::{dashboard, deliveries, health, parts, schedule};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Dashboard figures
        .route("/api/dashboard", get(dashboard::stats))
        // Listings
        .route("/api/dostawy", get(deliveries::list))
        .route("/api/magazyn", get(parts::list))
        .route("/api/harmonogram", get(schedule::list))
        // Inventory mutations
        .route("/api/magazyn/update_stock", post(parts::update_stock))
        .route("/api/magazyn/add", post(parts::create))
        .route("/api/magazyn/delete", post(parts::delete))
        // Dashboard page - fallback for everything else
        .fallback(static_files::static_handler)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
