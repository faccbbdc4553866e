//! Workspace Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A tenant/site scoping boundary; employees and attendance are
/// partitioned by it
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create workspace payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WorkspaceCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
