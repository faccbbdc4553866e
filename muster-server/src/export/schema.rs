//! Export column schema
//!
//! The column set varies per request (days in month, table kind), so the
//! layout is computed first as an ordered schema and the renderer then
//! walks employees against it. "What columns exist" and "how a row is
//! painted" stay decoupled.

use crate::attendance::ShiftCode;

/// Which of the two table layouts to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Plain attendance grid: one column per day
    Attendance,
    /// Day/Night shift grid: a D and an N sub-column per day
    Shifts,
}

impl TableKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attendance" => Some(Self::Attendance),
            "shifts" | "shift" => Some(Self::Shifts),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attendance => "attendance",
            Self::Shifts => "shifts",
        }
    }
}

/// Semantic role of a column, driving both header layout and cell painting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// 1-based position in the exported list (not the stored serial)
    Serial,
    Name,
    Designation,
    /// Attendance status cell for one day
    Day(u8),
    /// One half of a day's D/N sub-column pair
    ShiftDay(u8, ShiftCode),
    OnDuty,
    OtDays,
    Remarks,
}

/// One column of the export layout
#[derive(Debug, Clone)]
pub struct Column {
    pub label: String,
    pub width: f64,
    pub role: ColumnRole,
}

impl Column {
    fn new(label: impl Into<String>, width: f64, role: ColumnRole) -> Self {
        Self {
            label: label.into(),
            width,
            role,
        }
    }
}

// Fixed document-layout widths; the artifact is consumed outside any UI
const WIDTH_SERIAL: f64 = 6.0;
const WIDTH_NAME: f64 = 28.0;
const WIDTH_DESIGNATION: f64 = 18.0;
const WIDTH_DAY: f64 = 3.5;
const WIDTH_SUMMARY: f64 = 10.0;
const WIDTH_REMARKS: f64 = 30.0;

/// Build the ordered column schema for one export
pub fn build_columns(days_in_month: u8, kind: TableKind) -> Vec<Column> {
    let mut columns = vec![
        Column::new("SL.NO", WIDTH_SERIAL, ColumnRole::Serial),
        Column::new("NAME", WIDTH_NAME, ColumnRole::Name),
        Column::new("DESIGNATION", WIDTH_DESIGNATION, ColumnRole::Designation),
    ];

    match kind {
        TableKind::Attendance => {
            for day in 1..=days_in_month {
                columns.push(Column::new(day.to_string(), WIDTH_DAY, ColumnRole::Day(day)));
            }
            columns.push(Column::new("ON DUTY", WIDTH_SUMMARY, ColumnRole::OnDuty));
            columns.push(Column::new("OT DAYS", WIDTH_SUMMARY, ColumnRole::OtDays));
            columns.push(Column::new("REMARKS", WIDTH_REMARKS, ColumnRole::Remarks));
        }
        TableKind::Shifts => {
            for day in 1..=days_in_month {
                columns.push(Column::new(
                    "D",
                    WIDTH_DAY,
                    ColumnRole::ShiftDay(day, ShiftCode::Day),
                ));
                columns.push(Column::new(
                    "N",
                    WIDTH_DAY,
                    ColumnRole::ShiftDay(day, ShiftCode::Night),
                ));
            }
            columns.push(Column::new("ON DUTY", WIDTH_SUMMARY, ColumnRole::OnDuty));
        }
    }

    columns
}
