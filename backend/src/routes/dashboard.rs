use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use shared::{DashboardStats, DeliveryStatus, StockStatus, INVENTORY_VALUE};
use std::sync::Arc;

use crate::db::schema::{czesci, dostawy};
use crate::AppState;

use super::{connection, internal_error};

pub async fn stats(State(state): State<Arc<AppState>>) -> Response {
    let mut conn = match connection(&state).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    let active_deliveries: i64 = match dostawy::table
        .filter(dostawy::status.ne(DeliveryStatus::Delivered.as_str()))
        .count()
        .get_result(&mut conn)
        .await
    {
        Ok(n) => n,
        Err(e) => return internal_error("Failed to count deliveries", e),
    };

    let (total_quantity, total_min_stock): (Option<i64>, Option<i64>) = match czesci::table
        .select((
            diesel::dsl::sum(czesci::ilosc),
            diesel::dsl::sum(czesci::min_stan),
        ))
        .get_result(&mut conn)
        .await
    {
        Ok(totals) => totals,
        Err(e) => return internal_error("Failed to sum stock levels", e),
    };

    let critical_items: i64 = match czesci::table
        .filter(czesci::status.eq(StockStatus::LowStock.as_str()))
        .count()
        .get_result(&mut conn)
        .await
    {
        Ok(n) => n,
        Err(e) => return internal_error("Failed to count low stock parts", e),
    };

    Json(DashboardStats {
        active_deliveries,
        warehouse_utilization: shared::warehouse_utilization(total_quantity, total_min_stock),
        critical_items,
        inventory_value: INVENTORY_VALUE.to_string(),
    })
    .into_response()
}
