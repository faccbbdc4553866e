//! Attendance Record Repository
//!
//! Upserts replace the stored day map wholesale; the read-modify-write
//! merge happens in the attendance engine, not here.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{AttendanceRecord, AttendanceUpsert, MonthlyAttendanceRow};
use crate::utils::time::now_millis;

const COLUMNS: &str =
    "id, employee_id, month, year, day_map, total_on_duty, ot_days, remarks, created_at, updated_at";

/// Fetch by composite key; a miss is not an error
pub async fn find_by_key(
    pool: &SqlitePool,
    employee_id: i64,
    month: u32,
    year: i32,
) -> RepoResult<Option<AttendanceRecord>> {
    let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
        "SELECT {COLUMNS} FROM attendance_record WHERE employee_id = ? AND month = ? AND year = ?"
    ))
    .bind(employee_id)
    .bind(month)
    .bind(year)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// Insert-or-replace keyed on (employee_id, month, year)
pub async fn upsert(pool: &SqlitePool, data: AttendanceUpsert) -> RepoResult<AttendanceRecord> {
    if !(1..=12).contains(&data.month) {
        return Err(RepoError::Validation(format!(
            "Month must be between 1 and 12, got {}",
            data.month
        )));
    }

    let now = now_millis();
    sqlx::query(
        "INSERT INTO attendance_record (employee_id, month, year, day_map, total_on_duty, ot_days, remarks, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8) \
         ON CONFLICT (employee_id, month, year) DO UPDATE SET \
            day_map = excluded.day_map, \
            total_on_duty = excluded.total_on_duty, \
            ot_days = excluded.ot_days, \
            remarks = excluded.remarks, \
            updated_at = excluded.updated_at",
    )
    .bind(data.employee_id)
    .bind(data.month)
    .bind(data.year)
    .bind(&data.day_map)
    .bind(data.total_on_duty)
    .bind(data.ot_days)
    .bind(&data.remarks)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_key(pool, data.employee_id, data.month, data.year)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert attendance record".into()))
}

/// Workspace-month listing: every active employee in designation-then-name
/// order, left-joined to their record (absent record = all blank)
pub async fn list_for_workspace_month(
    pool: &SqlitePool,
    workspace_id: i64,
    month: u32,
    year: i32,
) -> RepoResult<Vec<MonthlyAttendanceRow>> {
    let rows = sqlx::query_as::<_, MonthlyAttendanceRow>(
        "SELECT e.id AS employee_id, e.employee_id AS employee_code, e.name, e.designation, r.day_map, r.remarks \
         FROM employee e \
         LEFT JOIN attendance_record r ON r.employee_id = e.id AND r.month = ? AND r.year = ? \
         WHERE e.workspace_id = ? AND e.status = 'Active' \
         ORDER BY e.designation_order, e.name",
    )
    .bind(month)
    .bind(year)
    .bind(workspace_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Raw records of a workspace for one month, keyed for export assembly
pub async fn find_for_workspace_month(
    pool: &SqlitePool,
    workspace_id: i64,
    month: u32,
    year: i32,
) -> RepoResult<Vec<AttendanceRecord>> {
    let records = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT r.id, r.employee_id, r.month, r.year, r.day_map, r.total_on_duty, r.ot_days, r.remarks, r.created_at, r.updated_at \
         FROM attendance_record r \
         JOIN employee e ON e.id = r.employee_id \
         WHERE e.workspace_id = ? AND r.month = ? AND r.year = ?",
    )
    .bind(workspace_id)
    .bind(month)
    .bind(year)
    .fetch_all(pool)
    .await?;
    Ok(records)
}
