//! App Settings Repository (Singleton)

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{AppSettings, SettingsUpdate};
use crate::utils::time::now_millis;

const SINGLETON_ID: i64 = 1;

pub async fn get(pool: &SqlitePool) -> RepoResult<AppSettings> {
    // The singleton row is seeded by the initial migration
    sqlx::query_as::<_, AppSettings>(
        "SELECT id, company_name, rig_name, updated_at FROM app_settings WHERE id = ?",
    )
    .bind(SINGLETON_ID)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::Database("Settings row missing".into()))
}

pub async fn update(pool: &SqlitePool, data: SettingsUpdate) -> RepoResult<AppSettings> {
    let now = now_millis();
    sqlx::query(
        "UPDATE app_settings SET company_name = COALESCE(?1, company_name), rig_name = COALESCE(?2, rig_name), updated_at = ?3 WHERE id = ?4",
    )
    .bind(&data.company_name)
    .bind(&data.rig_name)
    .bind(now)
    .bind(SINGLETON_ID)
    .execute(pool)
    .await?;

    get(pool).await
}
