//! App Settings Model (singleton)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Company/rig names used as export document header text
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AppSettings {
    pub id: i64,
    pub company_name: String,
    pub rig_name: String,
    pub updated_at: i64,
}

/// Update settings payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SettingsUpdate {
    #[validate(length(max = 200))]
    pub company_name: Option<String>,
    #[validate(length(max = 200))]
    pub rig_name: Option<String>,
}
