//! Shift API Handlers
//!
//! Shift-only operations scoped to the shift store, gated by the P/OT
//! attendance precondition in the engine.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::attendance::handler::{MonthQuery, parse_shift};
use crate::core::ServerState;
use crate::db::models::{
    MonthlyShiftResponse, RecordShiftDayPayload, RecordShiftRangePayload, ShiftRecordResponse,
};
use crate::db::repository;
use crate::utils::time::{validate_month, validate_year};
use crate::utils::{AppError, AppResult};

/// GET /api/shifts/{employee_id}?month&year
pub async fn get_month(
    State(state): State<ServerState>,
    Path(employee_id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<ShiftRecordResponse>> {
    validate_month(query.month)?;
    validate_year(query.year)?;

    repository::employee::find_by_id(&state.pool, employee_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", employee_id)))?;

    let record =
        repository::shift::find_by_key(&state.pool, employee_id, query.month, query.year).await?;
    let response = record
        .as_ref()
        .map(ShiftRecordResponse::from)
        .unwrap_or_else(|| ShiftRecordResponse::blank(employee_id, query.month, query.year));
    Ok(Json(response))
}

/// GET /api/shifts/workspace/{workspace_id}?month&year
pub async fn list_workspace_month(
    State(state): State<ServerState>,
    Path(workspace_id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<Vec<MonthlyShiftResponse>>> {
    validate_month(query.month)?;
    validate_year(query.year)?;

    if repository::workspace::find_by_id(&state.pool, workspace_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found(format!(
            "Workspace {} not found",
            workspace_id
        )));
    }

    let rows = repository::shift::list_for_workspace_month(
        &state.pool,
        workspace_id,
        query.month,
        query.year,
    )
    .await?;
    Ok(Json(rows.iter().map(MonthlyShiftResponse::from).collect()))
}

/// POST /api/shifts/day - set or clear one day's assignment
pub async fn record_day(
    State(state): State<ServerState>,
    Json(payload): Json<RecordShiftDayPayload>,
) -> AppResult<Json<ShiftRecordResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let shift = parse_shift(Some(&payload.shift))?;
    let record = state
        .engine
        .record_shift_day(
            payload.employee_id,
            payload.month,
            payload.year,
            payload.day,
            shift,
        )
        .await?;
    Ok(Json(record))
}

/// POST /api/shifts/range - bulk assignment; non-P/OT days are skipped
pub async fn record_range(
    State(state): State<ServerState>,
    Json(payload): Json<RecordShiftRangePayload>,
) -> AppResult<Json<ShiftRecordResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let shift = parse_shift(Some(&payload.shift))?;
    let record = state
        .engine
        .record_shift_range(
            payload.employee_id,
            payload.month,
            payload.year,
            payload.start_day,
            payload.end_day,
            shift,
        )
        .await?;
    Ok(Json(record))
}
