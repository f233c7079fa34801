use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use shared::ScheduleEntryResponse;
use std::sync::Arc;

use crate::db::schema::harmonogram;
use crate::models::ScheduleEntry;
use crate::AppState;

use super::{connection, internal_error};

pub async fn list(State(state): State<Arc<AppState>>) -> Response {
    let mut conn = match connection(&state).await {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match harmonogram::table
        .order(harmonogram::id.asc())
        .select(ScheduleEntry::as_select())
        .load::<ScheduleEntry>(&mut conn)
        .await
    {
        Ok(entries) => Json(
            entries
                .into_iter()
                .map(ScheduleEntryResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => internal_error("Failed to fetch schedule", e),
    }
}
