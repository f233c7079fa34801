use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use shared::{
    ApiError, CreatePart, CreatePartResponse, DeletePart, PartResponse, StockLevel,
    StockUpdateResponse, SuccessResponse, UpdateStock,
};
use std::sync::Arc;

use crate::db::schema::{czesci, dostawy};
use crate::models::{NewPart, Part};
use crate::AppState;

use super::{connection, internal_error};

/// All parts, newest first, with availability and fill progress derived.
pub async fn list(State(state): State<Arc<AppState>>) -> Response {
    let mut conn = match connection(&state).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match czesci::table
        .order(czesci::id.desc())
        .select(Part::as_select())
        .load::<Part>(&mut conn)
        .await
    {
        Ok(parts) => Json(
            parts
                .into_iter()
                .map(PartResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => internal_error("Failed to fetch parts", e),
    }
}

pub async fn update_stock(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateStock>,
) -> Response {
    let mut conn = match connection(&state).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let UpdateStock { id, change } = payload;

    let result = conn
        .transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let current: Option<(i32, i32)> = czesci::table
                    .filter(czesci::id.eq(id))
                    .select((czesci::ilosc, czesci::min_stan))
                    .first(conn)
                    .await
                    .optional()?;

                let Some((quantity, min_stock)) = current else {
                    return Ok(None);
                };

                let level = shared::apply_change(quantity, min_stock, change);

                diesel::update(czesci::table.filter(czesci::id.eq(id)))
                    .set((
                        czesci::ilosc.eq(level.quantity),
                        czesci::status.eq(level.status.as_str()),
                    ))
                    .execute(conn)
                    .await?;

                Ok(Some(level))
            }
            .scope_boxed()
        })
        .await;

    match result {
        Ok(Some(StockLevel { quantity, status })) => {
            tracing::debug!(part_id = id, change, quantity, "Stock adjusted");
            Json(StockUpdateResponse {
                success: true,
                new_qty: quantity,
                status: status.as_str().to_string(),
            })
            .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiError::not_found(format!("Part {} not found", id))),
        )
            .into_response(),
        Err(e) => internal_error("Failed to update stock", e),
    }
}

/// Adds a part. Any decoding or database failure is reported back as a 400
/// carrying the underlying error text.
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePart>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(p)) => p,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiError::validation_error(rejection.body_text())),
            )
                .into_response()
        }
    };

    let mut conn = match connection(&state).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let new_part = NewPart::new(
        payload.name,
        payload.category,
        payload.quantity,
        0,
        payload.min_stock,
    );

    match diesel::insert_into(czesci::table)
        .values(&new_part)
        .returning(czesci::id)
        .get_result::<i32>(&mut conn)
        .await
    {
        Ok(id) => {
            tracing::info!(part_id = id, name = %new_part.name, "Part added");
            (
                StatusCode::CREATED,
                Json(CreatePartResponse { success: true, id }),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::validation_error(e.to_string())),
        )
            .into_response(),
    }
}

/// Removes a part together with the deliveries that reference it. Unknown
/// ids are not an error.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DeletePart>,
) -> Response {
    let mut conn = match connection(&state).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let id = payload.id;

    let result = conn
        .transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let deliveries = diesel::delete(dostawy::table.filter(dostawy::czesc_id.eq(id)))
                    .execute(conn)
                    .await?;
                let parts = diesel::delete(czesci::table.filter(czesci::id.eq(id)))
                    .execute(conn)
                    .await?;
                Ok((parts, deliveries))
            }
            .scope_boxed()
        })
        .await;

    match result {
        Ok((parts, deliveries)) => {
            tracing::info!(part_id = id, parts, deliveries, "Part deleted");
            Json(SuccessResponse { success: true }).into_response()
        }
        Err(e) => internal_error("Failed to delete part", e),
    }
}
