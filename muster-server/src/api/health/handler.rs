//! Health API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub database: &'static str,
}

/// Liveness plus a cheap database round-trip
pub async fn health(State(state): State<ServerState>) -> AppResult<Json<Health>> {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => "up",
        Err(_) => "down",
    };
    Ok(Json(Health {
        status: "ok",
        database,
    }))
}
