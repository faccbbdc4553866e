//! Employee Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult, workspace};
use crate::attendance::designation_rank;
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate, STATUS_ACTIVE};
use crate::utils::time::now_millis;

const COLUMNS: &str = "id, workspace_id, employee_id, name, designation, designation_order, status, serial_number, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

/// Active employees of a workspace in designation-then-name order
///
/// This ordering is load-bearing: export row numbering (SL.NO) and UI
/// listings depend on it.
pub async fn find_active_for_workspace(
    pool: &SqlitePool,
    workspace_id: i64,
) -> RepoResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee WHERE workspace_id = ? AND status = 'Active' ORDER BY designation_order, name"
    ))
    .bind(workspace_id)
    .fetch_all(pool)
    .await?;
    Ok(employees)
}

/// All employees of a workspace including inactive
pub async fn find_for_workspace(pool: &SqlitePool, workspace_id: i64) -> RepoResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee WHERE workspace_id = ? ORDER BY designation_order, name"
    ))
    .bind(workspace_id)
    .fetch_all(pool)
    .await?;
    Ok(employees)
}

/// Create a new employee, minting the next serial number and the
/// zero-padded display code from it
pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    if workspace::find_by_id(pool, data.workspace_id).await?.is_none() {
        return Err(RepoError::NotFound(format!(
            "Workspace {} not found",
            data.workspace_id
        )));
    }

    let serial = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(MAX(serial_number), 0) + 1 FROM employee WHERE workspace_id = ?",
    )
    .bind(data.workspace_id)
    .fetch_one(pool)
    .await?;

    let designation = data
        .designation
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    let rank = designation_rank(designation.as_deref());
    let code = format!("{:03}", serial);
    let now = now_millis();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO employee (workspace_id, employee_id, name, designation, designation_order, status, serial_number, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8) RETURNING id",
    )
    .bind(data.workspace_id)
    .bind(&code)
    .bind(data.name.trim())
    .bind(&designation)
    .bind(rank)
    .bind(STATUS_ACTIVE)
    .bind(serial)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

/// Update an employee; any designation change re-ranks the row
pub async fn update(pool: &SqlitePool, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

    if !data.status_is_valid() {
        return Err(RepoError::Validation(
            "Status must be 'Active' or 'Inactive'".to_string(),
        ));
    }

    // Some("") clears the designation; None leaves it untouched
    let (designation, rank) = match data.designation.as_deref().map(str::trim) {
        Some("") => (None, designation_rank(None)),
        Some(d) => (Some(d.to_string()), designation_rank(Some(d))),
        None => (
            existing.designation.clone(),
            existing.designation_order,
        ),
    };

    let now = now_millis();
    sqlx::query(
        "UPDATE employee SET name = COALESCE(?1, name), designation = ?2, designation_order = ?3, status = COALESCE(?4, status), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(&designation)
    .bind(rank)
    .bind(&data.status)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
}

/// Hard delete an employee along with their attendance and shift records
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Employee {} not found", id)));
    }

    sqlx::query("DELETE FROM attendance_record WHERE employee_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM shift_record WHERE employee_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}
