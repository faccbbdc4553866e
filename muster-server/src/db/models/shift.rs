//! Shift Record Model
//!
//! Parallel to the attendance record but with an independent key space:
//! `total_on_duty` here counts days with any shift assigned, not days
//! marked Present.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::attendance::ShiftMap;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShiftRecord {
    pub id: i64,
    pub employee_id: i64,
    pub month: u32,
    pub year: i32,
    pub day_map: String,
    pub total_on_duty: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ShiftRecord {
    pub fn days(&self) -> ShiftMap {
        ShiftMap::from_json(&self.day_map)
    }
}

/// Upsert arguments (wholesale day-map replacement, like attendance)
#[derive(Debug, Clone)]
pub struct ShiftUpsert {
    pub employee_id: i64,
    pub month: u32,
    pub year: i32,
    pub day_map: String,
    pub total_on_duty: i64,
}

/// API shape of a shift record
#[derive(Debug, Clone, Serialize)]
pub struct ShiftRecordResponse {
    pub employee_id: i64,
    pub month: u32,
    pub year: i32,
    pub days: ShiftMap,
    pub total_on_duty: i64,
}

impl ShiftRecordResponse {
    pub fn blank(employee_id: i64, month: u32, year: i32) -> Self {
        Self {
            employee_id,
            month,
            year,
            days: ShiftMap::new(),
            total_on_duty: 0,
        }
    }
}

impl From<&ShiftRecord> for ShiftRecordResponse {
    fn from(record: &ShiftRecord) -> Self {
        let days = record.days();
        Self {
            employee_id: record.employee_id,
            month: record.month,
            year: record.year,
            total_on_duty: days.assigned_days(),
            days,
        }
    }
}

/// Joined row for workspace-month shift listings
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlyShiftRow {
    pub employee_id: i64,
    pub employee_code: String,
    pub name: String,
    pub designation: Option<String>,
    pub day_map: Option<String>,
}

/// API shape of a workspace-month shift listing row
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyShiftResponse {
    pub employee_id: i64,
    pub employee_code: String,
    pub name: String,
    pub designation: Option<String>,
    pub days: ShiftMap,
    pub total_on_duty: i64,
}

impl From<&MonthlyShiftRow> for MonthlyShiftResponse {
    fn from(row: &MonthlyShiftRow) -> Self {
        let days = row
            .day_map
            .as_deref()
            .map(ShiftMap::from_json)
            .unwrap_or_default();
        Self {
            employee_id: row.employee_id,
            employee_code: row.employee_code.clone(),
            name: row.name.clone(),
            designation: row.designation.clone(),
            total_on_duty: days.assigned_days(),
            days,
        }
    }
}

/// Single-day shift payload; `shift: ""` clears the assignment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordShiftDayPayload {
    pub employee_id: i64,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[validate(range(min = 1900))]
    pub year: i32,
    #[validate(range(min = 1, max = 31))]
    pub day: u32,
    #[serde(default)]
    pub shift: String,
}

/// Bulk shift range payload; days whose attendance is not P/OT are
/// skipped, not errors
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordShiftRangePayload {
    pub employee_id: i64,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[validate(range(min = 1900))]
    pub year: i32,
    #[validate(range(min = 1, max = 31))]
    pub start_day: u32,
    #[validate(range(min = 1, max = 31))]
    pub end_day: u32,
    #[serde(default)]
    pub shift: String,
}
