//! Workspace API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Workspace, WorkspaceCreate};
use crate::db::repository;
use crate::utils::{AppError, AppResult};

/// List all workspaces
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Workspace>>> {
    let workspaces = repository::workspace::find_all(&state.pool).await?;
    Ok(Json(workspaces))
}

/// Get workspace by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Workspace>> {
    let workspace = repository::workspace::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Workspace {} not found", id)))?;
    Ok(Json(workspace))
}

/// Create a new workspace
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<WorkspaceCreate>,
) -> AppResult<Json<Workspace>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let workspace = repository::workspace::create(&state.pool, payload).await?;
    Ok(Json(workspace))
}
