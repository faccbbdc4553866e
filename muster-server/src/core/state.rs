//! Server State
//!
//! `ServerState` holds the shared service handles; `Clone` is cheap (pool
//! and engine are reference-counted).

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::attendance::AttendanceEngine;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub engine: Arc<AttendanceEngine>,
}

impl ServerState {
    /// Initialize the database and services from config
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let engine = Arc::new(AttendanceEngine::new(db.pool.clone()));
        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            engine,
        })
    }

    /// Build a state over an existing pool (tests)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let engine = Arc::new(AttendanceEngine::new(pool.clone()));
        Self {
            config,
            pool,
            engine,
        }
    }
}
