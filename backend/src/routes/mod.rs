pub mod dashboard;
pub mod deliveries;
pub mod health;
pub mod parts;
pub mod schedule;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel_async::pooled_connection::deadpool::Object;
use shared::ApiError;

use crate::db::DbConnection;
use crate::AppState;

/// Logs the underlying failure and answers with a generic 500.
pub(crate) fn internal_error(message: &'static str, err: impl std::fmt::Display) -> Response {
    tracing::error!(error = %err, "{}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::internal_error(message)),
    )
        .into_response()
}

pub(crate) async fn connection(state: &AppState) -> Result<Object<DbConnection>, Response> {
    state
        .pool
        .get()
        .await
        .map_err(|e| internal_error("Database connection failed", e))
}
