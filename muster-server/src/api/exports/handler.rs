//! Export API Handlers
//!
//! Loading runs on the async pool; workbook painting is CPU-bound and is
//! pushed onto the blocking pool under a configured timeout so a stuck
//! render never holds a connection forever or streams partial bytes.

use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, header},
};
use serde::Deserialize;
use tracing::info;

use crate::core::ServerState;
use crate::export::{self, TableKind};
use crate::utils::{AppError, AppResult};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Query params for a workbook export
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub month: u32,
    pub year: i32,
    /// "attendance" (default) or "shifts"
    pub table: Option<String>,
    /// Status fills on by default
    pub colors: Option<bool>,
    /// Comma-separated employee ids; absent means the whole roster
    pub employees: Option<String>,
}

fn parse_employee_ids(raw: &str) -> AppResult<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| AppError::validation(format!("Invalid employee id '{}'", part)))
        })
        .collect()
}

/// GET /api/exports/{workspace_id}?month&year&table&colors&employees
pub async fn export_month(
    State(state): State<ServerState>,
    Path(workspace_id): Path<i64>,
    Query(query): Query<ExportQuery>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    let kind = match query.table.as_deref() {
        None => TableKind::Attendance,
        Some(raw) => TableKind::parse(raw)
            .ok_or_else(|| AppError::validation(format!("Unknown table '{}'", raw)))?,
    };
    let with_colors = query.colors.unwrap_or(true);
    let employee_ids = query
        .employees
        .as_deref()
        .map(parse_employee_ids)
        .transpose()?;

    let data = export::load(
        &state.pool,
        workspace_id,
        query.month,
        query.year,
        employee_ids.as_deref(),
        kind,
        with_colors,
    )
    .await?;

    let timeout = Duration::from_secs(state.config.export_timeout_secs);
    let render_task = tokio::task::spawn_blocking(move || export::render(&data));
    let file = tokio::time::timeout(timeout, render_task)
        .await
        .map_err(|_| AppError::internal("Export rendering timed out".to_string()))?
        .map_err(|e| AppError::internal(format!("Export task failed: {e}")))??;

    info!(
        workspace_id,
        month = query.month,
        year = query.year,
        table = kind.as_str(),
        bytes = file.bytes.len(),
        "export generated"
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.filename))
            .map_err(|e| AppError::internal(format!("Invalid export filename: {e}")))?,
    );
    Ok((headers, file.bytes))
}
