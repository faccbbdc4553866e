//! Workspace Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{Workspace, WorkspaceCreate};
use crate::utils::time::now_millis;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Workspace>> {
    let workspaces = sqlx::query_as::<_, Workspace>(
        "SELECT id, name, created_at, updated_at FROM workspace ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(workspaces)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Workspace>> {
    let workspace = sqlx::query_as::<_, Workspace>(
        "SELECT id, name, created_at, updated_at FROM workspace WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(workspace)
}

pub async fn create(pool: &SqlitePool, data: WorkspaceCreate) -> RepoResult<Workspace> {
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO workspace (name, created_at, updated_at) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(data.name.trim())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!(
            "Workspace '{}' already exists",
            data.name.trim()
        )),
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create workspace".into()))
}
