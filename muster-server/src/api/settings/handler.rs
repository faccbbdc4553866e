//! Settings API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{AppSettings, SettingsUpdate};
use crate::db::repository;
use crate::utils::{AppError, AppResult};

/// Get company/rig settings
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<AppSettings>> {
    let settings = repository::settings::get(&state.pool).await?;
    Ok(Json(settings))
}

/// Update company/rig settings
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<SettingsUpdate>,
) -> AppResult<Json<AppSettings>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let settings = repository::settings::update(&state.pool, payload).await?;
    Ok(Json(settings))
}
