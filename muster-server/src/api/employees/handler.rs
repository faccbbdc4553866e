//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate};
use crate::db::repository;
use crate::utils::{AppError, AppResult};

/// List active employees of a workspace (designation-then-name order)
pub async fn list(
    State(state): State<ServerState>,
    Path(workspace_id): Path<i64>,
) -> AppResult<Json<Vec<Employee>>> {
    let employees =
        repository::employee::find_active_for_workspace(&state.pool, workspace_id).await?;
    Ok(Json(employees))
}

/// List all employees of a workspace including inactive
pub async fn list_with_inactive(
    State(state): State<ServerState>,
    Path(workspace_id): Path<i64>,
) -> AppResult<Json<Vec<Employee>>> {
    let employees = repository::employee::find_for_workspace(&state.pool, workspace_id).await?;
    Ok(Json(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    let employee = repository::employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let employee = repository::employee::create(&state.pool, payload).await?;
    Ok(Json(employee))
}

/// Update an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let employee = repository::employee::update(&state.pool, id, payload).await?;
    Ok(Json(employee))
}

/// Delete an employee and their attendance/shift records
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = repository::employee::delete(&state.pool, id).await?;
    Ok(Json(result))
}
