//! Database Models
//!
//! Row types (`sqlx::FromRow`) plus Create/Update payload DTOs and API
//! response shapes.

pub mod attendance;
pub mod employee;
pub mod settings;
pub mod shift;
pub mod workspace;

pub use attendance::{
    AttendanceRecord, AttendanceRecordResponse, AttendanceUpsert, MonthlyAttendanceResponse,
    MonthlyAttendanceRow, RecordDayPayload, RecordRangePayload,
};
pub use employee::{Employee, EmployeeCreate, EmployeeUpdate, STATUS_ACTIVE, STATUS_INACTIVE};
pub use settings::{AppSettings, SettingsUpdate};
pub use shift::{
    MonthlyShiftResponse, MonthlyShiftRow, RecordShiftDayPayload, RecordShiftRangePayload,
    ShiftRecord, ShiftRecordResponse, ShiftUpsert,
};
pub use workspace::{Workspace, WorkspaceCreate};
