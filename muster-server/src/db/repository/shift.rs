//! Shift Record Repository
//!
//! Same operation shapes as the attendance repository over an independent
//! key space. The P/OT gating rule is enforced by the engine.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{MonthlyShiftRow, ShiftRecord, ShiftUpsert};
use crate::utils::time::now_millis;

const COLUMNS: &str = "id, employee_id, month, year, day_map, total_on_duty, created_at, updated_at";

pub async fn find_by_key(
    pool: &SqlitePool,
    employee_id: i64,
    month: u32,
    year: i32,
) -> RepoResult<Option<ShiftRecord>> {
    let record = sqlx::query_as::<_, ShiftRecord>(&format!(
        "SELECT {COLUMNS} FROM shift_record WHERE employee_id = ? AND month = ? AND year = ?"
    ))
    .bind(employee_id)
    .bind(month)
    .bind(year)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

pub async fn upsert(pool: &SqlitePool, data: ShiftUpsert) -> RepoResult<ShiftRecord> {
    if !(1..=12).contains(&data.month) {
        return Err(RepoError::Validation(format!(
            "Month must be between 1 and 12, got {}",
            data.month
        )));
    }

    let now = now_millis();
    sqlx::query(
        "INSERT INTO shift_record (employee_id, month, year, day_map, total_on_duty, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) \
         ON CONFLICT (employee_id, month, year) DO UPDATE SET \
            day_map = excluded.day_map, \
            total_on_duty = excluded.total_on_duty, \
            updated_at = excluded.updated_at",
    )
    .bind(data.employee_id)
    .bind(data.month)
    .bind(data.year)
    .bind(&data.day_map)
    .bind(data.total_on_duty)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_key(pool, data.employee_id, data.month, data.year)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert shift record".into()))
}

/// Workspace-month listing mirroring the attendance listing shape
pub async fn list_for_workspace_month(
    pool: &SqlitePool,
    workspace_id: i64,
    month: u32,
    year: i32,
) -> RepoResult<Vec<MonthlyShiftRow>> {
    let rows = sqlx::query_as::<_, MonthlyShiftRow>(
        "SELECT e.id AS employee_id, e.employee_id AS employee_code, e.name, e.designation, r.day_map \
         FROM employee e \
         LEFT JOIN shift_record r ON r.employee_id = e.id AND r.month = ? AND r.year = ? \
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
) -> RepoResult<Vec<ShiftRecord>> {
    let records = sqlx::query_as::<_, ShiftRecord>(
        "SELECT r.id, r.employee_id, r.month, r.year, r.day_map, r.total_on_duty, r.created_at, r.updated_at \
         FROM shift_record r \
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
