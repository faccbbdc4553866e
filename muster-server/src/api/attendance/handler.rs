//! Attendance API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::attendance::{AttendanceStatus, ShiftCode};
use crate::core::ServerState;
use crate::db::models::{
    AttendanceRecordResponse, MonthlyAttendanceResponse, RecordDayPayload, RecordRangePayload,
};
use crate::db::repository;
use crate::utils::time::{validate_month, validate_year};
use crate::utils::{AppError, AppResult};

/// Month/year query params
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: u32,
    pub year: i32,
}

/// Parse a shift field: empty/missing means no shift, unknown codes are
/// rejected rather than silently dropped
pub(crate) fn parse_shift(shift: Option<&str>) -> AppResult<Option<ShiftCode>> {
    match shift.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => ShiftCode::parse(raw)
            .map(Some)
            .ok_or_else(|| AppError::validation(format!("Unknown shift code '{}'", raw))),
    }
}

/// GET /api/attendance/{employee_id}?month&year
///
/// A missing record reads as all days blank; the employee must exist.
pub async fn get_month(
    State(state): State<ServerState>,
    Path(employee_id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<AttendanceRecordResponse>> {
    validate_month(query.month)?;
    validate_year(query.year)?;

    repository::employee::find_by_id(&state.pool, employee_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", employee_id)))?;

    let record =
        repository::attendance::find_by_key(&state.pool, employee_id, query.month, query.year)
            .await?;
    let response = record
        .as_ref()
        .map(AttendanceRecordResponse::from)
        .unwrap_or_else(|| {
            AttendanceRecordResponse::blank(employee_id, query.month, query.year)
        });
    Ok(Json(response))
}

/// GET /api/attendance/workspace/{workspace_id}?month&year
///
/// Every active employee of the workspace in designation-then-name order,
/// blank maps for employees without a record.
pub async fn list_workspace_month(
    State(state): State<ServerState>,
    Path(workspace_id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<Vec<MonthlyAttendanceResponse>>> {
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

    let rows = repository::attendance::list_for_workspace_month(
        &state.pool,
        workspace_id,
        query.month,
        query.year,
    )
    .await?;
    Ok(Json(rows.iter().map(MonthlyAttendanceResponse::from).collect()))
}

/// POST /api/attendance/day - single-cell update with shift cascade
pub async fn record_day(
    State(state): State<ServerState>,
    Json(payload): Json<RecordDayPayload>,
) -> AppResult<Json<AttendanceRecordResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let status = AttendanceStatus::parse(&payload.status);
    let shift = parse_shift(payload.shift.as_deref())?;

    let record = state
        .engine
        .record_day(
            payload.employee_id,
            payload.month,
            payload.year,
            payload.day,
            status,
            shift,
            payload.remarks,
        )
        .await?;
    Ok(Json(AttendanceRecordResponse::from(&record)))
}

/// POST /api/attendance/range - bulk range update with shift cascade
pub async fn record_range(
    State(state): State<ServerState>,
    Json(payload): Json<RecordRangePayload>,
) -> AppResult<Json<AttendanceRecordResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let status = AttendanceStatus::parse(&payload.status);
    let shift = parse_shift(payload.shift.as_deref())?;

    let record = state
        .engine
        .record_range(
            payload.employee_id,
            payload.month,
            payload.year,
            payload.start_day,
            payload.end_day,
            status,
            shift,
            payload.remarks,
        )
        .await?;
    Ok(Json(AttendanceRecordResponse::from(&record)))
}
