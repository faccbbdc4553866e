//! Shared test fixtures

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use muster_server::db::models::{EmployeeCreate, WorkspaceCreate};
use muster_server::db::repository;

/// In-memory database with the full schema applied
///
/// A single connection keeps every query on the same in-memory instance.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

pub async fn seed_workspace(pool: &SqlitePool, name: &str) -> i64 {
    repository::workspace::create(
        pool,
        WorkspaceCreate {
            name: name.to_string(),
        },
    )
    .await
    .expect("create workspace")
    .id
}

pub async fn seed_employee(
    pool: &SqlitePool,
    workspace_id: i64,
    name: &str,
    designation: Option<&str>,
) -> i64 {
    repository::employee::create(
        pool,
        EmployeeCreate {
            workspace_id,
            name: name.to_string(),
            designation: designation.map(str::to_string),
        },
    )
    .await
    .expect("create employee")
    .id
}
