use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use shared::DeliveryResponse;
use std::sync::Arc;

use crate::db::schema::{czesci, dostawy};
use crate::models::Delivery;
use crate::AppState;

use super::{connection, internal_error};

/// Every delivery together with the name of the part it brings in.
pub async fn list(State(state): State<Arc<AppState>>) -> Response {
    let mut conn = match connection(&state).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let rows: Vec<(Delivery, String)> = match dostawy::table
        .inner_join(czesci::table)
        .order(dostawy::id.asc())
        .select((Delivery::as_select(), czesci::nazwa))
        .load(&mut conn)
        .await
    {
        Ok(rows) => rows,
        Err(e) => return internal_error("Failed to fetch deliveries", e),
    };

    let result: Vec<DeliveryResponse> = rows
        .into_iter()
        .map(|(d, part)| DeliveryResponse {
            id: d.id,
            supplier: d.supplier,
            part,
            quantity: d.quantity,
            due_date: d.due_date,
            status: d.status,
        })
        .collect();

    Json(result).into_response()
}
