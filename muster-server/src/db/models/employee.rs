//! Employee Model

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const STATUS_ACTIVE: &str = "Active";
pub const STATUS_INACTIVE: &str = "Inactive";

/// Employee row
///
/// `employee_id` is the human-readable zero-padded code minted from
/// `serial_number`; both are unique per workspace. `designation_order` is
/// the denormalized sort rank, recomputed whenever `designation` changes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub workspace_id: i64,
    pub employee_id: String,
    pub name: String,
    pub designation: Option<String>,
    pub designation_order: i64,
    pub status: String,
    pub serial_number: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

/// Create employee payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmployeeCreate {
    pub workspace_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 100))]
    pub designation: Option<String>,
}

/// Update employee payload
///
/// `designation: Some("")` clears the designation (and resets the rank).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub designation: Option<String>,
    pub status: Option<String>,
}

impl EmployeeUpdate {
    /// Status values outside Active/Inactive are rejected before any write
    pub fn status_is_valid(&self) -> bool {
        match self.status.as_deref() {
            None | Some(STATUS_ACTIVE) | Some(STATUS_INACTIVE) => true,
            Some(_) => false,
        }
    }
}
