//! Attendance Record Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::attendance::DayMap;

/// One row per (employee, month, year); `day_map` holds the stored JSON
/// shape (`{"1":"P",...}`). The counter columns are advisory; every
/// computation derives from the day map instead.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    pub month: u32,
    pub year: i32,
    pub day_map: String,
    pub total_on_duty: i64,
    pub ot_days: i64,
    pub remarks: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl AttendanceRecord {
    /// Decode the stored day map (corrupt payloads decode as empty)
    pub fn days(&self) -> DayMap {
        DayMap::from_json(&self.day_map)
    }
}

/// Upsert arguments; the day map replaces the stored one wholesale, so
/// callers merge with prior state first
#[derive(Debug, Clone)]
pub struct AttendanceUpsert {
    pub employee_id: i64,
    pub month: u32,
    pub year: i32,
    pub day_map: String,
    pub total_on_duty: i64,
    pub ot_days: i64,
    pub remarks: Option<String>,
}

/// API shape of an attendance record, with the day map decoded and the
/// totals recomputed from it
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecordResponse {
    pub employee_id: i64,
    pub month: u32,
    pub year: i32,
    pub days: DayMap,
    pub total_on_duty: i64,
    pub ot_days: i64,
    pub remarks: Option<String>,
}

impl AttendanceRecordResponse {
    /// A miss reads as "all days blank, no remarks"
    pub fn blank(employee_id: i64, month: u32, year: i32) -> Self {
        Self {
            employee_id,
            month,
            year,
            days: DayMap::new(),
            total_on_duty: 0,
            ot_days: 0,
            remarks: None,
        }
    }
}

impl From<&AttendanceRecord> for AttendanceRecordResponse {
    fn from(record: &AttendanceRecord) -> Self {
        let days = record.days();
        Self {
            employee_id: record.employee_id,
            month: record.month,
            year: record.year,
            total_on_duty: days.present_days(),
            ot_days: days.ot_days(),
            days,
            remarks: record.remarks.clone(),
        }
    }
}

/// Joined row for workspace-month listings: every active employee in
/// designation-then-name order, with the record fields nullable for
/// employees that have no row yet
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthlyAttendanceRow {
    pub employee_id: i64,
    pub employee_code: String,
    pub name: String,
    pub designation: Option<String>,
    pub day_map: Option<String>,
    pub remarks: Option<String>,
}

/// API shape of a workspace-month listing row
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyAttendanceResponse {
    pub employee_id: i64,
    pub employee_code: String,
    pub name: String,
    pub designation: Option<String>,
    pub days: DayMap,
    pub total_on_duty: i64,
    pub ot_days: i64,
    pub remarks: Option<String>,
}

impl From<&MonthlyAttendanceRow> for MonthlyAttendanceResponse {
    fn from(row: &MonthlyAttendanceRow) -> Self {
        let days = row
            .day_map
            .as_deref()
            .map(DayMap::from_json)
            .unwrap_or_default();
        Self {
            employee_id: row.employee_id,
            employee_code: row.employee_code.clone(),
            name: row.name.clone(),
            designation: row.designation.clone(),
            total_on_duty: days.present_days(),
            ot_days: days.ot_days(),
            days,
            remarks: row.remarks.clone(),
        }
    }
}

/// Single-cell update payload
///
/// `status: ""` clears the day; `shift` is applied only when the status
/// allows one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordDayPayload {
    pub employee_id: i64,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[validate(range(min = 1900))]
    pub year: i32,
    #[validate(range(min = 1, max = 31))]
    pub day: u32,
    #[serde(default)]
    pub status: String,
    pub shift: Option<String>,
    pub remarks: Option<String>,
}

/// Bulk range update payload ([start_day, end_day] inclusive)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordRangePayload {
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
    pub status: String,
    pub shift: Option<String>,
    pub remarks: Option<String>,
}
